//! Procedural planet surface textures: seeded multi-octave noise sampled on
//! the sphere, normalized height maps, and elevation-band classification.

mod error;
mod generator;
mod heightmap;
mod noise_source;
mod surface;
mod tint;

pub mod projection;
pub mod seed;

pub use error::TextureError;
pub use generator::{TextureGenerator, TextureParams, generate_height_map};
pub use heightmap::{HeightMap, Normalization};
pub use noise_source::{NoiseLayer, SurfaceNoise, fbm};
pub use projection::texel_normal;
pub use surface::{SurfaceBands, SurfaceClass, SurfaceSample, color_to_rgba8};
pub use tint::{DEFAULT_JITTER, GradientTint};
