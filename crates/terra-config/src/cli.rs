//! Command-line argument parsing for the Terra viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, NormalizationMode, PaletteMode};

/// Terra command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "terra", about = "Procedural planet texture and day/night snapshots")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Texture width in texels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Texture height in texels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Octaves of the base noise layer.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Disable the detail noise layer.
    #[arg(long)]
    pub no_detail: bool,

    /// Use amplitude normalization instead of min/max stretch.
    #[arg(long)]
    pub amplitude_normalization: bool,

    /// Color the unshaded texture with a seeded gradient instead of bands.
    #[arg(long)]
    pub gradient: bool,

    /// Worker threads for generation (0 = one per CPU).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Time of day of the first frame, 0.0-1.0.
    #[arg(long)]
    pub time_of_day: Option<f64>,

    /// Number of shaded frames to render.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Output directory for PNG snapshots.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.texture.seed = seed;
        }
        if let Some(w) = args.width {
            self.texture.width = w;
        }
        if let Some(h) = args.height {
            self.texture.height = h;
        }
        if let Some(octaves) = args.octaves {
            self.noise.base.octaves = octaves;
        }
        if args.no_detail {
            self.noise.detail_enabled = false;
        }
        if args.amplitude_normalization {
            self.texture.normalization = NormalizationMode::Amplitude;
        }
        if args.gradient {
            self.texture.palette = PaletteMode::Gradient;
        }
        if let Some(threads) = args.threads {
            self.texture.threads = threads;
        }
        if let Some(t) = args.time_of_day {
            self.cycle.start_time_of_day = t;
        }
        if let Some(frames) = args.frames {
            self.cycle.frames = frames;
        }
        if let Some(ref dir) = args.output {
            self.output.directory = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(7),
            width: Some(1024),
            gradient: true,
            output: Some(PathBuf::from("/tmp/terra")),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.texture.seed, 7);
        assert_eq!(config.texture.width, 1024);
        assert_eq!(config.texture.palette, PaletteMode::Gradient);
        assert_eq!(config.output.directory, PathBuf::from("/tmp/terra"));
        // Non-overridden fields retain defaults
        assert_eq!(config.texture.height, 256);
        assert!(config.noise.detail_enabled);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "terra",
            "--seed",
            "42",
            "--octaves",
            "4",
            "--no-detail",
            "--time-of-day",
            "0.25",
        ]);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.octaves, Some(4));
        assert!(args.no_detail);
        assert_eq!(args.time_of_day, Some(0.25));
        assert!(!args.gradient);
    }
}
