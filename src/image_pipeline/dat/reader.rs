use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::dat::types::{BandCube, BandImage};

pub trait BandReader {
    /// Decode a whole multi-band file into a `(width, height, bands)` cube.
    fn read_cube(&self, data: &[u8], dims: (usize, usize, usize)) -> Result<BandCube>;

    /// Decode one `(width, height)` band out of a multi-band file.
    fn read_band(&self, data: &[u8], dims: (usize, usize), band_index: usize)
    -> Result<BandImage>;
}
