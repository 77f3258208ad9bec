//! Headless planet viewer: generates a seeded surface texture and renders
//! shaded snapshots across the day/night cycle.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p terra-viewer -- --seed 7 --frames 8` to render eight frames.

mod pipeline;
mod snapshot;

use std::process::ExitCode;

use clap::Parser;
use terra_config::{CliArgs, Config, ConfigError, default_config_dir};
use terra_shading::ShadingError;
use terra_texture::TextureError;
use tracing::{error, info};

/// Everything that can stop a snapshot run.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error(transparent)]
    Shading(#[from] ShadingError),

    #[error("failed to encode snapshot: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to prepare output directory: {0}")]
    Output(#[source] std::io::Error),

    #[error("snapshot `{name}` has {actual} pixels, expected {expected}")]
    PixelCount {
        name: String,
        expected: usize,
        actual: usize,
    },
}

fn load_config(args: &CliArgs) -> Result<Config, ConfigError> {
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from the config, so it is not up yet.
            eprintln!("terra: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_dir = args.config.clone().unwrap_or_else(default_config_dir);
    terra_log::init_logging(Some(&log_dir), Some(&config.debug));

    info!(
        seed = config.texture.seed,
        width = config.texture.width,
        height = config.texture.height,
        frames = config.cycle.frames,
        "starting snapshot run"
    );

    match pipeline::run(&config) {
        Ok(written) => {
            info!(
                count = written.len(),
                directory = %config.output.directory.display(),
                "snapshots written"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "snapshot run failed");
            ExitCode::FAILURE
        }
    }
}
