//! Conversion configuration types

/// Configuration for DAT to PNG conversion
///
/// The camera's .DAT files carry no header, so the frame dimensions and
/// band count live here and must match the file being decoded. Defaults
/// match the camera's fixed 2448x2448 3-band frame.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Extent of the fast (column-major) axis
    pub width: usize,
    /// Extent of the slow axis
    pub height: usize,
    /// Band count of a full cube read
    pub bands: usize,
    /// Explicit stretch bounds; `None` uses the 2nd/98th percentiles
    pub percentiles: Option<(f32, f32)>,
    /// Whether to contrast-stretch on export
    pub rescale: bool,
    /// Whether to validate image dimensions before conversion
    pub validate_dimensions: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            width: 2448,
            height: 2448,
            bands: 3,
            percentiles: None,
            rescale: true,
            validate_dimensions: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }

    pub fn band_dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn cube_dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.bands)
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    width: Option<usize>,
    height: Option<usize>,
    bands: Option<usize>,
    percentiles: Option<Option<(f32, f32)>>,
    rescale: Option<bool>,
    validate_dimensions: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn dims(mut self, width: usize, height: usize) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn bands(mut self, bands: usize) -> Self {
        self.bands = Some(bands);
        self
    }

    pub fn percentiles(mut self, percentiles: Option<(f32, f32)>) -> Self {
        self.percentiles = Some(percentiles);
        self
    }

    pub fn rescale(mut self, enable: bool) -> Self {
        self.rescale = Some(enable);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            width: self.width.unwrap_or(default.width),
            height: self.height.unwrap_or(default.height),
            bands: self.bands.unwrap_or(default.bands),
            percentiles: self.percentiles.unwrap_or(default.percentiles),
            rescale: self.rescale.unwrap_or(default.rescale),
            validate_dimensions: self
                .validate_dimensions
                .unwrap_or(default.validate_dimensions),
        }
    }
}
