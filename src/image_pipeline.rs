//! Image processing pipeline module
//!
//! This module provides a structured approach to multispectral .DAT
//! processing, with separate modules for band reading, band-expression
//! evaluation, enhancement, PNG writing, and conversion orchestration.

pub mod common;
pub mod conversions;
pub mod dat;
pub mod enhance;
pub mod expr;
pub mod png;

pub use common::{ConversionError, Result};

pub use dat::{BandCube, BandImage, BandReader, FlatDatReader, FloatImage};

pub use enhance::{
    Colormap, Gray8Image, PostRescale, Rgb8Image, map_to_color, rescale, rescale_to_u8,
};

pub use expr::{BandTable, evaluate_expression};

pub use png::{PngWriter, StandardPngWriter};

pub use conversions::{ConversionConfig, ConversionConfigBuilder, DatToPngPipeline, convert_folder};
