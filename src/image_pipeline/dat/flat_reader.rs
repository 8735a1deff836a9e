//! Reader for the camera's headerless .DAT files.
//!
//! The format is a flat sequence of little-endian unsigned 16-bit samples in
//! column-major order, with no magic bytes and no metadata. Dimensions and
//! band count must be supplied by the caller (the camera's fixed frame is
//! 2448x2448). A file holds either a stack of single bands or one
//! interleaved 3-band RGB cube.

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::dat::reader::BandReader;
use crate::image_pipeline::dat::types::{BandCube, BandImage};

/// Decoder for the flat .DAT sample stream.
///
/// The whole buffer is decoded on every call; single-band reads slice the
/// decoded stream afterwards.
pub struct FlatDatReader;

impl FlatDatReader {
    /// Decode the byte buffer as little-endian u16 samples.
    ///
    /// A trailing odd byte is ignored; a wrong sample count is caught by the
    /// shape checks in the callers.
    fn decode_samples(data: &[u8]) -> Vec<u16> {
        data.chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect()
    }
}

impl BandReader for FlatDatReader {
    /// Reads the entire file as a `(width, height, bands)` cube.
    ///
    /// Because the file layout is already column-major, reshaping is a
    /// bookkeeping step: the decoded stream is the cube. The sample count
    /// must match the requested dimensions exactly; a short or long file is
    /// an error, never silently truncated or padded.
    fn read_cube(&self, data: &[u8], dims: (usize, usize, usize)) -> Result<BandCube> {
        let (width, height, bands) = dims;
        let samples = Self::decode_samples(data);
        debug!(
            "Decoded {} samples, expecting {}x{}x{}",
            samples.len(),
            width,
            height,
            bands
        );

        if samples.len() != width * height * bands {
            return Err(ConversionError::ShapeError {
                width,
                height,
                bands,
                actual: samples.len(),
            });
        }

        Ok(BandCube {
            width,
            height,
            bands,
            data: samples,
        })
    }

    /// Reads band `band_index` of a multi-band file as a `(width, height)`
    /// image.
    ///
    /// The band occupies samples `[i * W * H, (i + 1) * W * H)` of the
    /// stream. An index whose range extends past the end of the file is out
    /// of range. The file may hold more trailing samples than the requested
    /// band needs; only the slice bounds are checked.
    fn read_band(
        &self,
        data: &[u8],
        dims: (usize, usize),
        band_index: usize,
    ) -> Result<BandImage> {
        let (width, height) = dims;
        let samples = Self::decode_samples(data);

        let plane = width * height;
        let start = band_index * plane;
        let end = start + plane;
        if end > samples.len() {
            return Err(ConversionError::BandIndexOutOfRange {
                index: band_index,
                needed: end,
                available: samples.len(),
            });
        }

        debug!(
            "Sliced band {} ({} samples of {})",
            band_index,
            plane,
            samples.len()
        );

        Ok(BandImage {
            width,
            height,
            data: samples[start..end].to_vec(),
        })
    }
}
