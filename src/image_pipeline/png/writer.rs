use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::enhance::types::{Gray8Image, Rgb8Image};

pub trait PngWriter {
    fn write_rgb(&self, image: &Rgb8Image, output: &mut dyn Write) -> Result<()>;
    fn write_gray(&self, image: &Gray8Image, output: &mut dyn Write) -> Result<()>;
}
