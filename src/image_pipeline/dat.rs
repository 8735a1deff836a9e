//! DAT band reading module
//!
//! This module decodes the flat binary .DAT files produced by the
//! phenotyping camera into 2-D bands or 3-band RGB cubes.

mod flat_reader;
mod reader;
pub mod types;

pub use flat_reader::FlatDatReader;
pub use reader::BandReader;
pub use types::{BandCube, BandImage, FloatImage};
