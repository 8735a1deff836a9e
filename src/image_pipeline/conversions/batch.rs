use std::path::PathBuf;

use tracing::{info, warn};

use crate::image_pipeline::conversions::dat_to_png::DatToPngPipeline;
use crate::image_pipeline::dat::BandReader;
use crate::image_pipeline::png::PngWriter;

/// Convert a list of RGB .DAT captures, writing each PNG next to its input
/// with the extension swapped.
///
/// Per-item failures are logged and skipped so one bad file does not abort
/// the batch. Returns the number of files converted.
pub fn convert_folder<R: BandReader, W: PngWriter>(
    pipeline: &DatToPngPipeline<R, W>,
    paths: &[PathBuf],
) -> usize {
    let mut converted = 0;

    for path in paths {
        let output = path.with_extension("png");
        match pipeline.convert_file(path, &output) {
            Ok(()) => converted += 1,
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    info!("Converted {} of {} files", converted, paths.len());
    converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::conversions::types::ConversionConfig;

    fn write_cube(path: &std::path::Path, samples: usize) {
        let bytes: Vec<u8> = (0..samples as u16).flat_map(|v| v.to_le_bytes()).collect();
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_bad_items_are_counted_out_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("CLR_A.DAT");
        let truncated = dir.path().join("CLR_B.DAT");
        let missing = dir.path().join("CLR_C.DAT");
        write_cube(&good, 2 * 2 * 3);
        write_cube(&truncated, 5);

        let config = ConversionConfig::builder().dims(2, 2).build();
        let pipeline = DatToPngPipeline::new(config);

        let converted = convert_folder(&pipeline, &[good.clone(), truncated.clone(), missing]);

        assert_eq!(converted, 1);
        assert!(good.with_extension("png").exists());
        assert!(!truncated.with_extension("png").exists());
    }
}
