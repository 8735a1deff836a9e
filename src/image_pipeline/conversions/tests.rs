use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversions::dat_to_png::DatToPngPipeline;
use crate::image_pipeline::conversions::types::ConversionConfig;
use crate::image_pipeline::dat::types::{BandCube, BandImage};
use crate::image_pipeline::dat::{BandReader, FlatDatReader};
use crate::image_pipeline::enhance::types::{Gray8Image, Rgb8Image};
use crate::image_pipeline::png::{PngWriter, StandardPngWriter};

struct MockReader {
    should_fail: bool,
    mock_cube: Option<BandCube>,
}

impl BandReader for MockReader {
    fn read_cube(&self, _data: &[u8], _dims: (usize, usize, usize)) -> Result<BandCube> {
        if self.should_fail {
            return Err(ConversionError::InputReadError(
                "mock read error".to_string(),
            ));
        }
        Ok(self.mock_cube.clone().unwrap_or(BandCube {
            width: 4,
            height: 4,
            bands: 3,
            data: vec![0u16; 4 * 4 * 3],
        }))
    }

    fn read_band(
        &self,
        data: &[u8],
        dims: (usize, usize),
        band_index: usize,
    ) -> Result<BandImage> {
        if self.should_fail {
            return Err(ConversionError::InputReadError(
                "mock read error".to_string(),
            ));
        }
        FlatDatReader.read_band(data, dims, band_index)
    }
}

struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<Rgb8Image>>>,
}

impl PngWriter for MockWriter {
    fn write_rgb(&self, image: &Rgb8Image, _output: &mut dyn Write) -> Result<()> {
        if self.should_fail {
            return Err(ConversionError::EncodeError("mock encode error".to_string()));
        }
        self.written.lock().unwrap().push(image.clone());
        Ok(())
    }

    fn write_gray(&self, _image: &Gray8Image, _output: &mut dyn Write) -> Result<()> {
        if self.should_fail {
            return Err(ConversionError::EncodeError("mock encode error".to_string()));
        }
        Ok(())
    }
}

#[test]
fn test_config_builder() {
    let config = ConversionConfig::builder()
        .dims(100, 200)
        .bands(3)
        .percentiles(Some((5.0, 95.0)))
        .rescale(false)
        .validate_dimensions(false)
        .build();

    assert_eq!(config.width, 100);
    assert_eq!(config.height, 200);
    assert_eq!(config.bands, 3);
    assert_eq!(config.percentiles, Some((5.0, 95.0)));
    assert!(!config.rescale);
    assert!(!config.validate_dimensions);
}

#[test]
fn test_config_defaults_match_camera_frame() {
    let config = ConversionConfig::default();
    assert_eq!(config.cube_dims(), (2448, 2448, 3));
    assert!(config.rescale);
}

#[test]
fn test_successful_conversion() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader {
        should_fail: false,
        mock_cube: None,
    };
    let writer = MockWriter {
        should_fail: false,
        written: written.clone(),
    };

    let pipeline = DatToPngPipeline::with_custom(reader, writer, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dat data", &mut output);

    assert!(result.is_ok());
    assert_eq!(written.lock().unwrap().len(), 1);
}

#[test]
fn test_reader_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let reader = MockReader {
        should_fail: true,
        mock_cube: None,
    };
    let writer = MockWriter {
        should_fail: false,
        written: written.clone(),
    };

    let pipeline = DatToPngPipeline::with_custom(reader, writer, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dat data", &mut output);

    assert!(matches!(
        result.unwrap_err(),
        ConversionError::InputReadError(_)
    ));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let reader = MockReader {
        should_fail: false,
        mock_cube: None,
    };
    let writer = MockWriter {
        should_fail: true,
        written: Arc::new(Mutex::new(Vec::new())),
    };

    let pipeline = DatToPngPipeline::with_custom(reader, writer, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dat data", &mut output);

    assert!(matches!(result.unwrap_err(), ConversionError::EncodeError(_)));
}

#[test]
fn test_dimension_validation_failure() {
    let reader = MockReader {
        should_fail: false,
        mock_cube: Some(BandCube {
            width: 0,
            height: 0,
            bands: 3,
            data: Vec::new(),
        }),
    };
    let writer = MockWriter {
        should_fail: false,
        written: Arc::new(Mutex::new(Vec::new())),
    };

    let config = ConversionConfig::builder().validate_dimensions(true).build();
    let pipeline = DatToPngPipeline::with_custom(reader, writer, config);

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dat data", &mut output);

    assert!(matches!(
        result.unwrap_err(),
        ConversionError::InvalidDimensions(0, 0)
    ));
}

#[test]
fn test_dimension_validation_disabled() {
    let reader = MockReader {
        should_fail: false,
        mock_cube: Some(BandCube {
            width: 0,
            height: 0,
            bands: 3,
            data: Vec::new(),
        }),
    };
    let writer = MockWriter {
        should_fail: false,
        written: Arc::new(Mutex::new(Vec::new())),
    };

    let config = ConversionConfig::builder()
        .validate_dimensions(false)
        .build();
    let pipeline = DatToPngPipeline::with_custom(reader, writer, config);

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dat data", &mut output);

    assert!(result.is_ok());
}

#[test]
fn test_non_rgb_cube_is_rejected() {
    let reader = MockReader {
        should_fail: false,
        mock_cube: Some(BandCube {
            width: 2,
            height: 2,
            bands: 5,
            data: vec![0u16; 2 * 2 * 5],
        }),
    };
    let writer = MockWriter {
        should_fail: false,
        written: Arc::new(Mutex::new(Vec::new())),
    };

    let pipeline = DatToPngPipeline::with_custom(reader, writer, ConversionConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.convert(b"fake dat data", &mut output);

    assert!(matches!(result.unwrap_err(), ConversionError::NotRgbCube(5)));
}

#[test]
fn test_end_to_end_capture_to_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("CLR_E0001.DAT");
    let output = dir.path().join("CLR_E0001.png");

    let bytes: Vec<u8> = (0..(4 * 4 * 3) as u16)
        .flat_map(|v| v.to_le_bytes())
        .collect();
    std::fs::write(&input, bytes).unwrap();

    let config = ConversionConfig::builder().dims(4, 4).build();
    let pipeline = DatToPngPipeline::new(config);
    pipeline.convert_file(&input, &output).unwrap();

    let decoded = image::open(&output).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (4, 4));
}

#[test]
fn test_expression_render_end_to_end() {
    use crate::image_pipeline::enhance::{Colormap, PostRescale};

    let dir = tempfile::tempdir().unwrap();
    let spectral = dir.path().join("SPC_E0001.DAT");
    let reference = dir.path().join("CLR_E0001.DAT");
    let output = dir.path().join("ratio.png");

    // Two 2x2 bands.
    let bytes: Vec<u8> = [10u16, 20, 30, 40, 1, 2, 3, 4]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    std::fs::write(&spectral, bytes).unwrap();

    let config = ConversionConfig::builder().dims(2, 2).build();
    let pipeline = DatToPngPipeline::new(config);
    pipeline
        .render_expression_file(
            "SPC[0] / SPC[1]",
            &reference,
            Colormap::Jet,
            PostRescale::UseMax,
            &output,
        )
        .unwrap();

    let decoded = image::open(&output).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (2, 2));
}
