//! Band data types
//!
//! All arrays use column-major (Fortran) layout: the first index varies
//! fastest in memory, so a sample at `(x, y)` lives at flat index
//! `x + y * width`, and band `k` of a cube starts at `k * width * height`.

/// A single 2-D band of unsigned 16-bit samples
#[derive(Debug, Clone, PartialEq)]
pub struct BandImage {
    /// Extent of the fast axis
    pub width: usize,
    /// Extent of the slow axis
    pub height: usize,
    /// Samples in column-major order, `width * height` long
    pub data: Vec<u16>,
}

impl BandImage {
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.data[x + y * self.width]
    }

    /// Convert to a float plane, the representation the band algebra
    /// operates on.
    pub fn to_float(&self) -> FloatImage {
        FloatImage {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f32::from(v)).collect(),
        }
    }
}

/// A stack of bands (or an interleaved RGB capture) decoded from one file
#[derive(Debug, Clone, PartialEq)]
pub struct BandCube {
    pub width: usize,
    pub height: usize,
    pub bands: usize,
    /// Samples in column-major order, `width * height * bands` long
    pub data: Vec<u16>,
}

impl BandCube {
    pub fn get(&self, x: usize, y: usize, k: usize) -> u16 {
        self.data[x + y * self.width + k * self.width * self.height]
    }

    /// Copy out band `k` as a standalone image.
    pub fn band(&self, k: usize) -> BandImage {
        let plane = self.width * self.height;
        BandImage {
            width: self.width,
            height: self.height,
            data: self.data[k * plane..(k + 1) * plane].to_vec(),
        }
    }
}

/// A 2-D float plane, produced by band algebra and consumed by rescaling
#[derive(Debug, Clone, PartialEq)]
pub struct FloatImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl FloatImage {
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// A plane filled with a single value.
    pub fn splat(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[x + y * self.width]
    }
}
