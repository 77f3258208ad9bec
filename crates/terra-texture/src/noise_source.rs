//! Multi-octave fractal Brownian motion (fBm) over seeded simplex noise.
//!
//! [`SurfaceNoise`] owns the seeded noise functions for a planet. It is
//! built once from the world seed and handed by reference to the texture
//! generator, so no noise state lives in globals.

use glam::DVec3;
use noise::{NoiseFn, Simplex};

use crate::error::TextureError;
use crate::seed::{SeedStream, derive_noise_seed};

/// Parameters for one fBm layer.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseLayer {
    /// Frequency applied to unit-sphere coordinates for the first octave.
    /// Larger values produce smaller continents.
    pub scale: f64,
    /// Number of octaves to composite. Must be at least 1.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
}

impl NoiseLayer {
    /// Broad continental shapes.
    pub fn base() -> Self {
        Self {
            scale: 4.0,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }

    /// Fine surface detail layered over the base.
    pub fn detail() -> Self {
        Self {
            scale: 20.0,
            octaves: 8,
            persistence: 0.6,
            lacunarity: 2.0,
        }
    }

    /// Geometric sum of all octave amplitudes (first octave amplitude 1).
    pub fn amplitude_sum(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        for _ in 0..self.octaves {
            sum += amp;
            amp *= self.persistence;
        }
        sum
    }

    pub(crate) fn validate(
        &self,
        octaves_name: &'static str,
        scale_name: &'static str,
        persistence_name: &'static str,
        lacunarity_name: &'static str,
    ) -> Result<(), TextureError> {
        if self.octaves == 0 {
            return Err(TextureError::invalid(octaves_name, "must be at least 1"));
        }
        positive_finite(scale_name, self.scale)?;
        positive_finite(persistence_name, self.persistence)?;
        positive_finite(lacunarity_name, self.lacunarity)?;
        Ok(())
    }
}

impl Default for NoiseLayer {
    fn default() -> Self {
        Self::base()
    }
}

fn positive_finite(name: &'static str, value: f64) -> Result<(), TextureError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TextureError::invalid(
            name,
            format!("must be finite and > 0, got {value}"),
        ));
    }
    Ok(())
}

/// Seeded noise source for a planet surface.
pub struct SurfaceNoise {
    seed: u64,
    base: Simplex,
    detail: Simplex,
}

impl SurfaceNoise {
    /// Build the noise functions for `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            base: Simplex::new(derive_noise_seed(seed, SeedStream::BaseNoise)),
            detail: Simplex::new(derive_noise_seed(seed, SeedStream::DetailNoise)),
        }
    }

    /// The world seed this source was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Base-layer fBm at a unit-sphere point, normalized to `[-1, 1]`.
    pub fn base(&self, point: DVec3, layer: &NoiseLayer) -> f64 {
        fbm(&self.base, point, layer)
    }

    /// Detail-layer fBm at a unit-sphere point, normalized to `[-1, 1]`.
    pub fn detail(&self, point: DVec3, layer: &NoiseLayer) -> f64 {
        fbm(&self.detail, point, layer)
    }
}

impl std::fmt::Debug for SurfaceNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceNoise").field("seed", &self.seed).finish()
    }
}

/// Sum `layer.octaves` octaves of `noise_fn` around `point`.
///
/// The result is divided by [`NoiseLayer::amplitude_sum`], so it stays in
/// the noise function's own range.
pub fn fbm(noise_fn: &impl NoiseFn<f64, 3>, point: DVec3, layer: &NoiseLayer) -> f64 {
    let mut total = 0.0;
    let mut frequency = layer.scale;
    let mut amplitude = 1.0;

    for _ in 0..layer.octaves {
        let p = point * frequency;
        total += noise_fn.get([p.x, p.y, p.z]) * amplitude;

        frequency *= layer.lacunarity;
        amplitude *= layer.persistence;
    }

    let sum = layer.amplitude_sum();
    if sum > 0.0 { total / sum } else { 0.0 }
}
