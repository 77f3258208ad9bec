//! Configuration for the Terra planet viewer.
//!
//! Settings persist to disk as `config.ron`, can be overridden from the
//! command line, and are range-checked by [`Config::validate`] before use.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BandsConfig, Config, CycleConfig, DebugConfig, NoiseConfig, NoiseLayerConfig,
    NormalizationMode, OutputConfig, PaletteMode, ShadingConfig, TextureConfig,
    default_config_dir,
};
pub use error::ConfigError;
