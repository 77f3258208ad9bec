//! Two-color gradient colorization with per-texel jitter.
//!
//! An alternative to the banded class palette: elevation blends linearly
//! between a low and a high color, and each channel of each texel is
//! scaled by a small random factor so flat regions do not band. All
//! randomness comes from the world seed, so the output is reproducible.

use rand::Rng;

use crate::heightmap::HeightMap;
use crate::seed::{SeedStream, stream_rng};

/// Channel range the random endpoint colors are drawn from.
const ENDPOINT_RANGE: std::ops::Range<u8> = 100..200;

/// Relative per-channel jitter applied to every texel.
pub const DEFAULT_JITTER: f32 = 0.01;

/// Endpoint colors and jitter for gradient colorization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientTint {
    /// RGB color at elevation 0.
    pub low: [u8; 3],
    /// RGB color at elevation 1.
    pub high: [u8; 3],
    /// Each channel is multiplied by a factor in `[1 - jitter, 1 + jitter)`.
    pub jitter: f32,
}

impl GradientTint {
    /// Tint with fixed endpoints and the default jitter.
    pub fn new(low: [u8; 3], high: [u8; 3]) -> Self {
        Self {
            low,
            high,
            jitter: DEFAULT_JITTER,
        }
    }

    /// Draw both endpoints from `rng`, each channel in `[100, 200)`.
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut channel = || rng.random_range(ENDPOINT_RANGE);
        let low = [channel(), channel(), channel()];
        let high = [channel(), channel(), channel()];
        Self::new(low, high)
    }

    /// Endpoints derived from the world seed.
    pub fn from_seed(world_seed: u64) -> Self {
        Self::random(&mut stream_rng(world_seed, SeedStream::TintColors))
    }

    /// Colorize `map` into row-major RGBA8 pixels.
    pub fn colorize(&self, map: &HeightMap, world_seed: u64) -> Vec<[u8; 4]> {
        let mut rng = stream_rng(world_seed, SeedStream::TintJitter);
        let jitter = self.jitter.abs();
        map.values()
            .iter()
            .map(|&value| {
                let mut pixel = [0, 0, 0, 255];
                for c in 0..3 {
                    let low = self.low[c] as f32;
                    let high = self.high[c] as f32;
                    let base = low * (1.0 - value) + high * value;
                    let factor = if jitter > 0.0 {
                        rng.random_range(1.0 - jitter..1.0 + jitter)
                    } else {
                        1.0
                    };
                    pixel[c] = (base * factor).clamp(0.0, 255.0) as u8;
                }
                pixel
            })
            .collect()
    }
}
