use std::io::Write;

use image::ImageEncoder;
use tracing::{debug, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::enhance::types::{Gray8Image, Rgb8Image};
use crate::image_pipeline::png::writer::PngWriter;

/// PNG writer with a two-codec strategy: encode with the `image` crate, and
/// if that fails for any reason, retry with a direct `png` encoder before
/// giving up.
pub struct StandardPngWriter;

impl StandardPngWriter {
    fn encode_primary(
        data: &[u8],
        width: u32,
        height: u32,
        color: image::ExtendedColorType,
        buffer: &mut Vec<u8>,
    ) -> Result<()> {
        image::codecs::png::PngEncoder::new(&mut *buffer)
            .write_image(data, width, height, color)
            .map_err(|e| ConversionError::EncodeError(e.to_string()))
    }

    fn encode_fallback(
        data: &[u8],
        width: u32,
        height: u32,
        color: png::ColorType,
        buffer: &mut Vec<u8>,
    ) -> Result<()> {
        let mut encoder = png::Encoder::new(&mut *buffer, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| ConversionError::EncodeError(e.to_string()))
    }

    fn encode(
        data: &[u8],
        width: u32,
        height: u32,
        primary_color: image::ExtendedColorType,
        fallback_color: png::ColorType,
        output: &mut dyn Write,
    ) -> Result<()> {
        let mut buffer = Vec::new();

        if let Err(e) = Self::encode_primary(data, width, height, primary_color, &mut buffer) {
            warn!("Primary PNG encoder failed ({}), using fallback", e);
            buffer.clear();
            Self::encode_fallback(data, width, height, fallback_color, &mut buffer)?;
        }

        output.write_all(&buffer)?;
        Ok(())
    }
}

impl PngWriter for StandardPngWriter {
    fn write_rgb(&self, image: &Rgb8Image, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding RGB PNG: {}x{}", image.width, image.height);
        Self::encode(
            &image.data,
            image.width as u32,
            image.height as u32,
            image::ExtendedColorType::Rgb8,
            png::ColorType::Rgb,
            output,
        )
    }

    fn write_gray(&self, image: &Gray8Image, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding grayscale PNG: {}x{}", image.width, image.height);
        Self::encode(
            &image.data,
            image.width as u32,
            image.height as u32,
            image::ExtendedColorType::L8,
            png::ColorType::Grayscale,
            output,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn test_rgb_output_decodes_back() {
        let src = Rgb8Image {
            width: 2,
            height: 3,
            data: vec![0; 2 * 3 * 3],
        };
        let mut buffer = Vec::new();
        StandardPngWriter.write_rgb(&src, &mut buffer).unwrap();

        assert_eq!(&buffer[..4], &[0x89, b'P', b'N', b'G']);
        let decoded = image::load_from_memory(&buffer).unwrap();
        assert_eq!(decoded.dimensions(), (2, 3));
    }

    #[test]
    fn test_gray_output_decodes_back() {
        let src = Gray8Image {
            width: 4,
            height: 2,
            data: vec![7; 8],
        };
        let mut buffer = Vec::new();
        StandardPngWriter.write_gray(&src, &mut buffer).unwrap();

        let decoded = image::load_from_memory(&buffer).unwrap();
        assert_eq!(decoded.dimensions(), (4, 2));
    }

    #[test]
    fn test_fallback_encoder_produces_decodable_png() {
        let data = vec![128u8; 2 * 2 * 3];
        let mut buffer = Vec::new();
        StandardPngWriter::encode_fallback(&data, 2, 2, png::ColorType::Rgb, &mut buffer)
            .unwrap();

        let decoded = image::load_from_memory(&buffer).unwrap();
        assert_eq!(decoded.dimensions(), (2, 2));
    }
}
