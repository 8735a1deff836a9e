//! Band reference resolution.
//!
//! A band reference like `SPC[1]` names band 1 of the sibling file obtained
//! by swapping the reference capture's 3-character family code (`CLR`, `SPC`)
//! while keeping the rest of the filename. This module scans an expression
//! for candidate references, derives each sibling path, and loads the bands
//! into a table keyed by the reference text.
//!
//! Resolution is best-effort: the candidate scan is permissive and may pick
//! up tokens that are not band references at all, so any token that
//! cannot be turned into a readable band is logged and dropped rather than
//! failing the evaluation. An unresolved token only becomes an error later,
//! if the expression actually uses it as an operand.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::dat::types::FloatImage;
use crate::image_pipeline::dat::BandReader;

/// Loaded bands keyed by reference text, built fresh per evaluation.
pub type BandTable = HashMap<String, FloatImage>;

/// Candidate band references in an expression.
///
/// Splits on whitespace after separating `]` from whatever follows it and
/// stripping the operator characters. Intentionally over-permissive; the
/// caller drops whatever fails to resolve.
pub fn scan_band_tokens(expression: &str) -> Vec<String> {
    let spaced = expression.replace(']', "] ");
    let cleaned: String = spaced
        .chars()
        .filter(|c| !matches!(c, '+' | '-' | '*' | '/' | '(' | ')'))
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Filename remainder after the 3-character family code.
pub fn reference_suffix(reference_path: &Path) -> Option<String> {
    let base = reference_path.file_name()?.to_str()?;
    Some(base.get(3..)?.to_string())
}

/// Family code and band index encoded in a reference token.
///
/// The family code is the first 3 characters; the band index is the single
/// character at position 4, i.e. the first digit inside the brackets of a
/// token like `SPC[1]`.
fn band_reference(token: &str) -> Option<(String, usize)> {
    let family: String = token.chars().take(3).collect();
    if family.chars().count() < 3 {
        return None;
    }
    let index = token.chars().nth(4)?.to_digit(10)? as usize;
    Some((family, index))
}

fn resolve_band<R: BandReader>(
    reader: &R,
    token: &str,
    directory: &Path,
    suffix: &str,
    dims: (usize, usize),
) -> Result<FloatImage> {
    let (family, index) = band_reference(token).ok_or_else(|| {
        ConversionError::ExpressionError(format!("'{token}' is not a band reference"))
    })?;

    let path = directory.join(format!("{family}{suffix}"));
    let bytes = fs::read(&path)
        .map_err(|e| ConversionError::InputReadError(format!("{}: {}", path.display(), e)))?;
    let band = reader.read_band(&bytes, dims, index)?;

    debug!("Resolved '{}' to band {} of {}", token, index, path.display());
    Ok(band.to_float())
}

/// Loads every resolvable band referenced by the expression.
///
/// Tokens that fail to resolve (malformed reference, missing file, band
/// index out of range) are reported and skipped.
pub fn resolve_band_table<R: BandReader>(
    reader: &R,
    expression: &str,
    reference_path: &Path,
    dims: (usize, usize),
) -> BandTable {
    let mut table = BandTable::new();

    let Some(suffix) = reference_suffix(reference_path) else {
        warn!(
            "Reference path {} has no usable filename, no bands resolved",
            reference_path.display()
        );
        return table;
    };
    let directory = reference_path.parent().unwrap_or_else(|| Path::new(""));

    for token in scan_band_tokens(expression) {
        if table.contains_key(&token) {
            continue;
        }
        match resolve_band(reader, &token, directory, &suffix, dims) {
            Ok(band) => {
                table.insert(token, band);
            }
            Err(e) => warn!("Skipping token '{}' (not a readable band): {}", token, e),
        }
    }

    table
}
