//! Pseudo-color mapping for single-band images.
//!
//! A stretched 8-bit band is turned into an RGB heat map by deriving a hue
//! from each intensity on the camera software's 0-255 hue wheel, with
//! saturation and value pinned at maximum. The scale factors below
//! (`1.46`, `3.5`) are the camera software's calibration constants and are
//! kept verbatim.

use std::str::FromStr;

use crate::image_pipeline::common::error::ConversionError;
use crate::image_pipeline::enhance::types::{Gray8Image, Rgb8Image};

/// Supported pseudo-color maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// Heat-map style, low intensities blue, high intensities red
    Jet,
    /// `Jet` with the hue ramp reversed
    JetInverted,
    /// Narrow red-to-green ramp used for Fv/Fm fluorescence ratios
    FvFm,
    /// Replicates the channel, no coloring
    Gray,
}

impl FromStr for Colormap {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jet" => Ok(Self::Jet),
            "jet inv" => Ok(Self::JetInverted),
            "fv/fm" => Ok(Self::FvFm),
            "gray" => Ok(Self::Gray),
            other => Err(ConversionError::UnsupportedColormap(other.to_string())),
        }
    }
}

impl Colormap {
    /// Hue byte for one intensity, on the 0-255 hue wheel.
    fn hue_byte(self, value: u8) -> u8 {
        match self {
            Self::Jet => 175 - (f32::from(value) / 1.46) as u8,
            Self::JetInverted => (f32::from(value) / 1.46) as u8,
            Self::FvFm => (f32::from(value) / 3.5) as u8,
            Self::Gray => unreachable!("gray bypasses the hue ramp"),
        }
    }
}

/// Convert HSV to RGB. Hue in degrees (0-360), saturation and value in
/// 0.0-1.0; returns RGB in 0.0-1.0.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

/// Map an 8-bit grayscale raster to an 8-bit RGB raster.
pub fn map_to_color(image: &Gray8Image, colormap: Colormap) -> Rgb8Image {
    let mut data = Vec::with_capacity(image.data.len() * 3);

    match colormap {
        Colormap::Gray => {
            for &v in &image.data {
                data.extend_from_slice(&[v, v, v]);
            }
        }
        ramp => {
            for &v in &image.data {
                let hue = f32::from(ramp.hue_byte(v)) / 255.0 * 360.0;
                let (r, g, b) = hsv_to_rgb(hue, 1.0, 1.0);
                data.push((r * 255.0).round() as u8);
                data.push((g * 255.0).round() as u8);
                data.push((b * 255.0).round() as u8);
            }
        }
    }

    Rgb8Image {
        width: image.width,
        height: image.height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(values: Vec<u8>) -> Gray8Image {
        Gray8Image {
            width: values.len(),
            height: 1,
            data: values,
        }
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (1.0, 0.0, 0.0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), (0.0, 1.0, 0.0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), (0.0, 0.0, 1.0));
    }

    #[test]
    fn test_jet_hue_ramp() {
        // hue byte 175 (blue end) at zero intensity, 1 (red end) at full.
        let rgb = map_to_color(&gray(vec![0, 128, 255]), Colormap::Jet);
        assert_eq!(rgb.get(0, 0), (30, 0, 255));
        assert_eq!(rgb.get(1, 0), (0, 255, 18));
        assert_eq!(rgb.get(2, 0), (255, 6, 0));
    }

    #[test]
    fn test_jet_inverted_reverses_ramp() {
        let rgb = map_to_color(&gray(vec![0, 128, 255]), Colormap::JetInverted);
        assert_eq!(rgb.get(0, 0), (255, 0, 0));
        assert_eq!(rgb.get(1, 0), (0, 255, 12));
        assert_eq!(rgb.get(2, 0), (24, 0, 255));
    }

    #[test]
    fn test_fvfm_ramp_spans_red_to_green() {
        let rgb = map_to_color(&gray(vec![0, 128, 255]), Colormap::FvFm);
        assert_eq!(rgb.get(0, 0), (255, 0, 0));
        assert_eq!(rgb.get(1, 0), (255, 216, 0));
        assert_eq!(rgb.get(2, 0), (78, 255, 0));
    }

    #[test]
    fn test_gray_replicates_channel() {
        let rgb = map_to_color(&gray(vec![0, 7, 255]), Colormap::Gray);
        assert_eq!(rgb.get(0, 0), (0, 0, 0));
        assert_eq!(rgb.get(1, 0), (7, 7, 7));
        assert_eq!(rgb.get(2, 0), (255, 255, 255));
    }

    #[test]
    fn test_unknown_colormap_name_is_rejected() {
        let result = "viridis".parse::<Colormap>();
        assert!(matches!(
            result.unwrap_err(),
            ConversionError::UnsupportedColormap(_)
        ));
    }
}
