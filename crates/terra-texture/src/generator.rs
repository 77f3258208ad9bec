//! Seamless equirectangular height map generation.
//!
//! Every texel is sampled on the unit sphere (see [`crate::projection`]),
//! which makes the horizontal wrap continuous and keeps the poles from
//! pinching into stripes. Rows are independent, so generation can be split
//! across worker threads without changing a single output bit.

use std::time::Instant;

use tracing::{debug, info_span};

use crate::error::TextureError;
use crate::heightmap::{HeightMap, Normalization};
use crate::noise_source::{NoiseLayer, SurfaceNoise};
use crate::projection::texel_sphere_point;

/// Everything besides the seed that determines a height map.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureParams {
    /// Width in texels (longitude). Must be at least 1.
    pub width: u32,
    /// Height in texels (latitude). Must be at least 1.
    pub height: u32,
    /// Broad continental layer.
    pub base: NoiseLayer,
    /// Optional fine detail layer mixed over the base.
    pub detail: Option<NoiseLayer>,
    /// Weight of the detail layer in `[0, 1]`; ignored when `detail` is `None`.
    pub detail_weight: f64,
    /// Mapping from raw noise into `[0, 1]`.
    pub normalization: Normalization,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            width: 512,
            height: 256,
            base: NoiseLayer::base(),
            detail: Some(NoiseLayer::detail()),
            detail_weight: 0.3,
            normalization: Normalization::Stretch,
        }
    }
}

impl TextureParams {
    /// Single-layer params with the given resolution and base octaves.
    pub fn single_layer(width: u32, height: u32, octaves: u32) -> Self {
        Self {
            width,
            height,
            base: NoiseLayer {
                octaves,
                ..NoiseLayer::base()
            },
            detail: None,
            ..Self::default()
        }
    }

    /// Reject params that cannot produce a valid map.
    pub fn validate(&self) -> Result<(), TextureError> {
        if self.width == 0 {
            return Err(TextureError::invalid("width", "must be at least 1"));
        }
        if self.height == 0 {
            return Err(TextureError::invalid("height", "must be at least 1"));
        }
        if (self.width as u64) * (self.height as u64) > u32::MAX as u64 {
            return Err(TextureError::invalid(
                "width",
                format!("{}x{} texels exceeds the addressable size", self.width, self.height),
            ));
        }
        self.base
            .validate("base.octaves", "base.scale", "base.persistence", "base.lacunarity")?;
        if let Some(detail) = &self.detail {
            detail.validate(
                "detail.octaves",
                "detail.scale",
                "detail.persistence",
                "detail.lacunarity",
            )?;
            if !(0.0..=1.0).contains(&self.detail_weight) {
                return Err(TextureError::invalid(
                    "detail_weight",
                    format!("must lie in [0, 1], got {}", self.detail_weight),
                ));
            }
        }
        Ok(())
    }
}

/// Generates height maps from a borrowed noise source and validated params.
#[derive(Debug)]
pub struct TextureGenerator<'a> {
    noise: &'a SurfaceNoise,
    params: TextureParams,
}

impl<'a> TextureGenerator<'a> {
    /// Validate `params` and bind them to `noise`.
    pub fn new(noise: &'a SurfaceNoise, params: TextureParams) -> Result<Self, TextureError> {
        params.validate()?;
        Ok(Self { noise, params })
    }

    pub fn params(&self) -> &TextureParams {
        &self.params
    }

    /// Raw (pre-normalization) value at a fractional column and a row.
    ///
    /// The field is continuous in `column`, and `column == width` samples the
    /// same meridian as column 0.
    pub fn sample_raw(&self, column: f64, row: u32) -> f64 {
        let p = &self.params;
        let point = texel_sphere_point(column, row, p.width, p.height);
        let base = self.noise.base(point, &p.base);
        match &p.detail {
            Some(detail) => {
                let w = p.detail_weight;
                base * (1.0 - w) + self.noise.detail(point, detail) * w
            }
            None => base,
        }
    }

    fn fill_row(&self, row: u32, out: &mut [f64]) {
        for (x, slot) in out.iter_mut().enumerate() {
            *slot = self.sample_raw(x as f64, row);
        }
    }

    /// Generate the full map on the calling thread.
    pub fn generate(&self) -> HeightMap {
        self.generate_with_threads(1)
    }

    /// Generate the map with one worker per available CPU.
    pub fn generate_parallel(&self) -> HeightMap {
        self.generate_with_threads(num_cpus::get().max(1))
    }

    /// Generate the map split into contiguous row bands across `threads`
    /// workers. `0` is treated as 1. Output does not depend on the thread
    /// count.
    pub fn generate_with_threads(&self, threads: usize) -> HeightMap {
        let p = &self.params;
        let _span = info_span!(
            "generate_height_map",
            seed = self.noise.seed(),
            width = p.width,
            height = p.height
        )
        .entered();
        let start = Instant::now();

        let width = p.width as usize;
        let height = p.height as usize;
        let threads = threads.clamp(1, height);
        let mut raw = vec![0.0_f64; width * height];

        if threads == 1 {
            for (y, row) in raw.chunks_mut(width).enumerate() {
                self.fill_row(y as u32, row);
            }
        } else {
            let rows_per_band = height.div_ceil(threads);
            std::thread::scope(|scope| {
                for (band, chunk) in raw.chunks_mut(rows_per_band * width).enumerate() {
                    let first_row = band * rows_per_band;
                    scope.spawn(move || {
                        for (i, row) in chunk.chunks_mut(width).enumerate() {
                            self.fill_row((first_row + i) as u32, row);
                        }
                    });
                }
            });
        }

        let map = HeightMap::from_raw(p.width, p.height, &raw, p.normalization);
        debug!(
            threads,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "height map generated"
        );
        map
    }
}

/// Validate `params` and generate a height map on the calling thread.
pub fn generate_height_map(
    noise: &SurfaceNoise,
    params: TextureParams,
) -> Result<HeightMap, TextureError> {
    Ok(TextureGenerator::new(noise, params)?.generate())
}
