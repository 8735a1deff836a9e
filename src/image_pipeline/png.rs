//! PNG writing module
//!
//! This module provides 8-bit PNG encoding with a primary codec and a
//! fallback encoder for when the primary fails.

mod standard_png_writer;
mod writer;

pub use standard_png_writer::StandardPngWriter;
pub use writer::PngWriter;
