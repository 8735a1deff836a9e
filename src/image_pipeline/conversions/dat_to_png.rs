use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversions::types::ConversionConfig;
use crate::image_pipeline::dat::{BandReader, FlatDatReader};
use crate::image_pipeline::enhance::{
    Colormap, PostRescale, cube_to_rgb8, map_to_color, rescale_cube_to_rgb8, rescale_to_u8,
};
use crate::image_pipeline::expr::evaluate_expression;
use crate::image_pipeline::png::{PngWriter, StandardPngWriter};

pub struct DatToPngPipeline<R: BandReader, W: PngWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl DatToPngPipeline<FlatDatReader, StandardPngWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: FlatDatReader,
            writer: StandardPngWriter,
            config,
        }
    }
}

impl<R: BandReader, W: PngWriter> DatToPngPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Convert one RGB .DAT capture to an 8-bit PNG.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        info!("Starting DAT to PNG conversion");

        let cube = {
            let _span = tracing::info_span!("decode_cube").entered();
            self.reader.read_cube(input_data, self.config.cube_dims())?
        };

        self.validate_dimensions(cube.width, cube.height)?;
        if cube.bands != 3 {
            return Err(ConversionError::NotRgbCube(cube.bands));
        }

        let rgb = {
            let _span = tracing::info_span!("rescale").entered();
            if self.config.rescale {
                rescale_cube_to_rgb8(&cube, self.config.percentiles)
            } else {
                cube_to_rgb8(&cube)
            }
        };

        {
            let _span = tracing::info_span!("encode_png").entered();
            self.writer.write_rgb(&rgb, output)?;
        }

        info!(
            width = cube.width,
            height = cube.height,
            "Conversion complete"
        );
        Ok(())
    }

    /// Evaluate a band expression against a reference capture, pseudo-color
    /// the result, and write it as an 8-bit PNG.
    #[instrument(skip(self, expression, reference_path, output))]
    pub fn render_expression(
        &self,
        expression: &str,
        reference_path: &Path,
        colormap: Colormap,
        post_rescale: PostRescale,
        output: &mut dyn Write,
    ) -> Result<()> {
        let computed = evaluate_expression(
            &self.reader,
            expression,
            reference_path,
            self.config.band_dims(),
        )?;
        self.validate_dimensions(computed.width, computed.height)?;

        let scaled = post_rescale.apply(computed);
        let gray = rescale_to_u8(&scaled, self.config.percentiles);
        self.writer.write_rgb(&map_to_color(&gray, colormap), output)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = std::fs::read(input_path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;

        // Encode into memory first so a failed conversion leaves no file.
        let mut buffer = Vec::new();
        self.convert(&input_data, &mut buffer)?;

        std::fs::write(output_path, buffer).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;

        Ok(())
    }

    #[instrument(skip(self, expression, reference_path, output_path))]
    pub fn render_expression_file<Q: AsRef<Path>>(
        &self,
        expression: &str,
        reference_path: &Path,
        colormap: Colormap,
        post_rescale: PostRescale,
        output_path: Q,
    ) -> Result<()> {
        let output_path = output_path.as_ref();

        let mut buffer = Vec::new();
        self.render_expression(expression, reference_path, colormap, post_rescale, &mut buffer)?;

        std::fs::write(output_path, buffer).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;

        Ok(())
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
