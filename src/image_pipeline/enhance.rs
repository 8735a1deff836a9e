//! Image enhancement module
//!
//! Contrast stretching and pseudo-color mapping applied between band
//! decoding and PNG export.

pub mod colormap;
pub mod rescale;
pub mod types;

pub use colormap::{Colormap, map_to_color};
pub use rescale::{
    PostRescale, cube_to_rgb8, percentile, rescale, rescale_cube_to_rgb8, rescale_to_u8,
};
pub use types::{Gray8Image, Rgb8Image};
