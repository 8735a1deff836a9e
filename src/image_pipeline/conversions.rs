//! Pipeline conversions module
//!
//! This module contains orchestration logic for turning .DAT captures and
//! band expressions into PNG files.

mod batch;
mod dat_to_png;
mod types;

#[cfg(test)]
mod tests;

pub use batch::convert_folder;
pub use dat_to_png::DatToPngPipeline;
pub use types::{ConversionConfig, ConversionConfigBuilder};
