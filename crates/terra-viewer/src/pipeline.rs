//! Translation from validated configuration into generator and shading
//! inputs, and the snapshot run itself.

use std::path::PathBuf;

use glam::Vec3;
use terra_config::{Config, NoiseLayerConfig, NormalizationMode, PaletteMode};
use terra_shading::{DayNightState, ShadingModel, ShadingParams, render_frame};
use terra_texture::{
    GradientTint, HeightMap, NoiseLayer, Normalization, SurfaceBands, SurfaceNoise,
    TextureGenerator, TextureParams,
};
use tracing::{info, info_span};

use crate::ViewerError;
use crate::snapshot::{Snapshot, write_png};

fn noise_layer(config: &NoiseLayerConfig) -> NoiseLayer {
    NoiseLayer {
        scale: config.scale,
        octaves: config.octaves,
        persistence: config.persistence,
        lacunarity: config.lacunarity,
    }
}

/// Generator params described by `config`.
pub fn texture_params(config: &Config) -> TextureParams {
    TextureParams {
        width: config.texture.width,
        height: config.texture.height,
        base: noise_layer(&config.noise.base),
        detail: config
            .noise
            .detail_enabled
            .then(|| noise_layer(&config.noise.detail)),
        detail_weight: config.noise.detail_weight,
        normalization: match config.texture.normalization {
            NormalizationMode::Stretch => Normalization::Stretch,
            NormalizationMode::Amplitude => Normalization::Amplitude,
        },
    }
}

/// Elevation bands described by `config`.
pub fn surface_bands(config: &Config) -> Result<SurfaceBands, ViewerError> {
    let b = &config.shading.bands;
    Ok(SurfaceBands::new(
        b.deep_water,
        b.shallow_water,
        b.lowland,
        b.highland,
    )?)
}

/// Shading model described by `config`, at the given ambient level.
pub fn shading_model(config: &Config, ambient: f32) -> Result<ShadingModel, ViewerError> {
    let [r, g, b] = config.shading.night_tint;
    Ok(ShadingModel::new(ShadingParams {
        ambient,
        diffuse_strength: config.shading.diffuse_strength,
        terminator_width: config.shading.terminator_width,
        night_tint: Vec3::new(r, g, b),
    })?)
}

/// Generate the height map for `config`.
pub fn generate(config: &Config, noise: &SurfaceNoise) -> Result<HeightMap, ViewerError> {
    let generator = TextureGenerator::new(noise, texture_params(config))?;
    let map = match config.texture.threads {
        0 => generator.generate_parallel(),
        n => generator.generate_with_threads(n),
    };
    Ok(map)
}

/// Unshaded surface pixels in the configured palette.
pub fn surface_pixels(
    config: &Config,
    map: &HeightMap,
    bands: &SurfaceBands,
) -> Vec<[u8; 4]> {
    match config.texture.palette {
        PaletteMode::Bands => map.to_class_pixels(bands),
        PaletteMode::Gradient => {
            let seed = config.texture.seed;
            GradientTint::from_seed(seed).colorize(map, seed)
        }
    }
}

/// Generate the texture, advance the day/night cycle, and write every
/// snapshot. Returns the paths written, in order.
pub fn run(config: &Config) -> Result<Vec<PathBuf>, ViewerError> {
    let _span = info_span!("snapshot_run", seed = config.texture.seed).entered();
    let out_dir = &config.output.directory;
    std::fs::create_dir_all(out_dir).map_err(ViewerError::Output)?;

    let noise = SurfaceNoise::new(config.texture.seed);
    let map = generate(config, &noise)?;
    let bands = surface_bands(config)?;
    let (width, height) = map.dimensions();
    let mut written = Vec::new();

    let surface = Snapshot::new("surface.png", width, height, surface_pixels(config, &map, &bands));
    written.push(write_png(out_dir, &surface)?);

    if config.output.write_heightmap {
        let gray = Snapshot::new("heightmap.png", width, height, map.to_gray_pixels());
        written.push(write_png(out_dir, &gray)?);
    }

    let cycle = &config.cycle;
    let mut day_night = DayNightState::new(cycle.day_length_seconds, cycle.start_time_of_day);
    for frame in 0..cycle.frames {
        if frame > 0 {
            day_night.tick(cycle.frame_step_seconds);
        }
        let model = shading_model(config, day_night.ambient)?;
        let pixels = render_frame(&map, &bands, &model, day_night.light);
        let name = format!("frame_{frame:03}.png");
        written.push(write_png(out_dir, &Snapshot::new(&name, width, height, pixels))?);
        info!(
            frame,
            time_of_day = day_night.clock.time_of_day,
            ambient = day_night.ambient,
            "rendered shaded frame"
        );
    }

    Ok(written)
}
