//! Immutable normalized height map produced by the texture generator.

use glam::Vec3;

use crate::surface::{SurfaceBands, SurfaceSample, color_to_rgba8};

/// How raw noise values are mapped into `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Normalization {
    /// Min/max stretch over the whole map, so the lowest texel is 0 and the
    /// highest is 1. A constant map becomes all 0.5.
    #[default]
    Stretch,
    /// `(raw + 1) / 2`, clamped. Depends only on the texel itself.
    Amplitude,
}

/// The concrete mapping applied to one map's raw values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Normalizer {
    Stretch { min: f64, max: f64 },
    Amplitude,
}

impl Normalizer {
    pub(crate) fn fit(mode: Normalization, raw: &[f64]) -> Self {
        match mode {
            Normalization::Amplitude => Self::Amplitude,
            Normalization::Stretch => {
                let (min, max) = raw
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        (lo.min(v), hi.max(v))
                    });
                Self::Stretch { min, max }
            }
        }
    }

    pub(crate) fn apply(&self, raw: f64) -> f32 {
        let v = match *self {
            Self::Amplitude => (raw + 1.0) * 0.5,
            Self::Stretch { min, max } => {
                let span = max - min;
                if span > 0.0 { (raw - min) / span } else { 0.5 }
            }
        };
        v.clamp(0.0, 1.0) as f32
    }
}

/// Row-major grid of normalized elevations, every value in `[0, 1]`.
///
/// Only the generator constructs height maps; there is no mutating API.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightMap {
    width: u32,
    height: u32,
    values: Vec<f32>,
    normalizer: Normalizer,
}

impl HeightMap {
    pub(crate) fn from_raw(width: u32, height: u32, raw: &[f64], mode: Normalization) -> Self {
        let normalizer = Normalizer::fit(mode, raw);
        let values = raw.iter().map(|&v| normalizer.apply(v)).collect();
        Self {
            width,
            height,
            values,
            normalizer,
        }
    }

    /// Texture width in texels (longitude).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in texels (latitude).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of texels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values, row-major.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// One row of values, or `None` if `y` is out of bounds.
    pub fn row(&self, y: u32) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        let start = (y * self.width) as usize;
        Some(&self.values[start..start + self.width as usize])
    }

    /// Value at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.values[(y * self.width + x) as usize])
    }

    /// Value at `(x, y)` with `x` wrapped around the horizontal seam.
    ///
    /// Returns `None` only if `y` is out of bounds.
    pub fn get_wrapped(&self, x: i64, y: u32) -> Option<f32> {
        let column = x.rem_euclid(self.width as i64) as u32;
        self.get(column, y)
    }

    /// Map a raw generator value into this map's `[0, 1]` range, using the
    /// same normalization the stored values went through.
    pub fn normalize_raw(&self, raw: f64) -> f32 {
        self.normalizer.apply(raw)
    }

    /// Classified sample at `(x, y)`.
    pub fn sample(&self, x: u32, y: u32, bands: &SurfaceBands) -> Option<SurfaceSample> {
        self.get(x, y).map(|v| SurfaceSample::classify(v, bands))
    }

    /// Unshaded surface texture: each texel's class color packed as RGBA8.
    pub fn to_class_pixels(&self, bands: &SurfaceBands) -> Vec<[u8; 4]> {
        self.values
            .iter()
            .map(|&v| color_to_rgba8(bands.classify(v).base_color()))
            .collect()
    }

    /// Grayscale elevation texture packed as RGBA8.
    pub fn to_gray_pixels(&self) -> Vec<[u8; 4]> {
        self.values
            .iter()
            .map(|&v| color_to_rgba8(Vec3::splat(v)))
            .collect()
    }
}
