//! Histogram stretching.
//!
//! A band fresh off the camera rarely fills its numeric range, so every
//! export path stretches intensities first. Bounds default to the 2nd and
//! 98th percentile of the image, or the caller supplies an explicit
//! `(low, high)` pair. All functions here are pure.

use tracing::debug;

use crate::image_pipeline::dat::types::{BandCube, FloatImage};
use crate::image_pipeline::enhance::types::{Gray8Image, Rgb8Image};

/// Percentile with linear interpolation between the two nearest ranks.
///
/// Returns 0.0 for an empty slice.
pub fn percentile(values: &[f32], p: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);

    let rank = (p / 100.0) * (sorted.len() - 1) as f32;
    let lo = rank.floor() as usize;
    let frac = rank - lo as f32;
    if lo + 1 >= sorted.len() {
        sorted[sorted.len() - 1]
    } else {
        sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
    }
}

fn stretch_bounds(values: &[f32], percentiles: Option<(f32, f32)>) -> (f32, f32) {
    percentiles.unwrap_or_else(|| (percentile(values, 2.0), percentile(values, 98.0)))
}

/// Clip into `[low, high]` and map linearly onto `[out_lo, out_hi]`.
fn stretch_into(values: &[f32], (low, high): (f32, f32), (out_lo, out_hi): (f32, f32)) -> Vec<f32> {
    let span = high - low;
    values
        .iter()
        .map(|&v| {
            let t = if span == 0.0 {
                0.0
            } else {
                ((v - low) / span).clamp(0.0, 1.0)
            };
            out_lo + t * (out_hi - out_lo)
        })
        .collect()
}

fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Stretch a float plane into the unit interval.
///
/// Maps `low` to 0 and `high` to the top of the output range. A plane
/// carrying negative values stretches into the signed unit interval first
/// and is then remapped through `(x + 1) / 2`, so the result always lands in
/// `[0, 1]`.
pub fn rescale(image: &FloatImage, percentiles: Option<(f32, f32)>) -> FloatImage {
    let bounds = stretch_bounds(&image.data, percentiles);
    debug!("Stretching {}x{} plane with bounds {:?}", image.width, image.height, bounds);

    let signed_source = image.data.iter().any(|&v| v < 0.0);
    let out_range = if signed_source { (-1.0, 1.0) } else { (0.0, 1.0) };
    let mut data = stretch_into(&image.data, bounds, out_range);

    if data.iter().any(|&v| v < 0.0) {
        for v in &mut data {
            *v = (*v + 1.0) / 2.0;
        }
    }

    FloatImage::new(image.width, image.height, data)
}

/// Stretch and reduce to 8 bits (precision-losing, clipped to `[0, 255]`).
pub fn rescale_to_u8(image: &FloatImage, percentiles: Option<(f32, f32)>) -> Gray8Image {
    let scaled = rescale(image, percentiles);
    Gray8Image {
        width: scaled.width,
        height: scaled.height,
        data: scaled.data.into_iter().map(to_byte).collect(),
    }
}

/// Stretch a 3-band cube jointly and interleave into an 8-bit RGB raster.
///
/// Bounds are computed over all three channels together so the channels keep
/// their relative balance.
pub fn rescale_cube_to_rgb8(cube: &BandCube, percentiles: Option<(f32, f32)>) -> Rgb8Image {
    debug_assert_eq!(cube.bands, 3);
    let values: Vec<f32> = cube.data.iter().map(|&v| f32::from(v)).collect();
    let bounds = stretch_bounds(&values, percentiles);
    let stretched = stretch_into(&values, bounds, (0.0, 1.0));

    interleave_rgb(cube.width, cube.height, |i| to_byte(stretched[i]))
}

/// Interleave a 3-band cube into 8-bit RGB without stretching, scaling the
/// full 16-bit range down linearly.
pub fn cube_to_rgb8(cube: &BandCube) -> Rgb8Image {
    debug_assert_eq!(cube.bands, 3);
    interleave_rgb(cube.width, cube.height, |i| {
        to_byte(f32::from(cube.data[i]) / 65535.0)
    })
}

fn interleave_rgb(width: usize, height: usize, sample: impl Fn(usize) -> u8) -> Rgb8Image {
    let plane = width * height;
    let mut data = Vec::with_capacity(plane * 3);
    for y in 0..height {
        for x in 0..width {
            let i = x + y * width;
            data.push(sample(i));
            data.push(sample(i + plane));
            data.push(sample(i + 2 * plane));
        }
    }
    Rgb8Image {
        width,
        height,
        data,
    }
}

/// Rescaling applied to the result of a band-algebra evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostRescale {
    /// The caller already keeps values in a sensible range
    BoundToUnitInterval,
    /// Divide by the image maximum; a zero maximum yields an all-zero image
    UseMax,
    /// Leave values untouched
    Passthrough,
}

impl PostRescale {
    /// Method names as the camera software spelled them; anything unknown
    /// passes the image through unchanged.
    pub fn from_method_name(name: &str) -> Self {
        match name {
            "bound_to_unitInterval" => Self::BoundToUnitInterval,
            "use_max" => Self::UseMax,
            _ => Self::Passthrough,
        }
    }

    pub fn apply(self, image: FloatImage) -> FloatImage {
        match self {
            Self::UseMax => {
                let max = image.data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                if max == 0.0 {
                    FloatImage::splat(image.width, image.height, 0.0)
                } else {
                    FloatImage::new(
                        image.width,
                        image.height,
                        image.data.iter().map(|&v| v / max).collect(),
                    )
                }
            }
            Self::BoundToUnitInterval | Self::Passthrough => image,
        }
    }
}
