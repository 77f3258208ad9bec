//! Deterministic seeded generation utilities.
//!
//! Derives independent per-layer seeds from a single world seed and wraps
//! `libm` trigonometry so the sphere mapping produces the same bits on
//! every platform.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Independent random streams drawn from one world seed.
///
/// Each stream maps to a distinct ChaCha stream id, so adding a new
/// consumer never shifts the values another consumer sees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeedStream {
    /// Broad continental noise.
    BaseNoise,
    /// Fine surface detail noise.
    DetailNoise,
    /// Gradient tint endpoint colors.
    TintColors,
    /// Per-texel gradient tint jitter.
    TintJitter,
}

impl SeedStream {
    fn id(self) -> u64 {
        match self {
            Self::BaseNoise => 1,
            Self::DetailNoise => 2,
            Self::TintColors => 3,
            Self::TintJitter => 4,
        }
    }
}

/// Build the RNG for one stream of a world seed.
///
/// The same `(world_seed, stream)` pair yields the same sequence regardless
/// of thread or platform.
pub fn stream_rng(world_seed: u64, stream: SeedStream) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(world_seed);
    rng.set_stream(stream.id());
    rng
}

/// Derive the 32-bit seed handed to a noise function.
pub fn derive_noise_seed(world_seed: u64, stream: SeedStream) -> u32 {
    stream_rng(world_seed, stream).next_u32()
}

// ---------------------------------------------------------------------------
// Deterministic math (libm)
// ---------------------------------------------------------------------------

/// Deterministic sine using libm (not platform libc).
#[inline]
pub fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine using libm.
#[inline]
pub fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}
