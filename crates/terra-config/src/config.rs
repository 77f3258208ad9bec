//! Configuration structs with sensible defaults and RON persistence.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Surface texture settings.
    pub texture: TextureConfig,
    /// Noise layer settings.
    pub noise: NoiseConfig,
    /// Shading settings.
    pub shading: ShadingConfig,
    /// Day/night cycle settings.
    pub cycle: CycleConfig,
    /// Snapshot output settings.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// How raw noise is normalized into `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum NormalizationMode {
    /// Stretch the map's own min/max onto `[0, 1]`.
    #[default]
    Stretch,
    /// Map the theoretical `[-1, 1]` noise range onto `[0, 1]`.
    Amplitude,
}

/// How the unshaded surface texture is colored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaletteMode {
    /// One color per elevation band.
    #[default]
    Bands,
    /// Seeded two-color gradient with jitter.
    Gradient,
}

/// Surface texture configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    /// World seed.
    pub seed: u64,
    /// Texture width in texels (512-8192).
    pub width: u32,
    /// Texture height in texels (256-4096).
    pub height: u32,
    /// Normalization of raw noise.
    pub normalization: NormalizationMode,
    /// Palette for the unshaded texture snapshot.
    pub palette: PaletteMode,
    /// Worker threads for generation (0 = one per CPU).
    pub threads: usize,
}

/// One fBm layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseLayerConfig {
    /// Base frequency on the unit sphere.
    pub scale: f64,
    /// Octave count (1-16).
    pub octaves: u32,
    /// Amplitude falloff per octave.
    pub persistence: f64,
    /// Frequency growth per octave.
    pub lacunarity: f64,
}

/// Noise configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    /// Broad continental layer.
    pub base: NoiseLayerConfig,
    /// Fine detail layer.
    pub detail: NoiseLayerConfig,
    /// Whether the detail layer is mixed in.
    pub detail_enabled: bool,
    /// Detail layer weight (0.0 - 1.0).
    pub detail_weight: f64,
}

/// Elevation band thresholds, ascending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BandsConfig {
    pub deep_water: f32,
    pub shallow_water: f32,
    pub lowland: f32,
    pub highland: f32,
}

/// Shading configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShadingConfig {
    /// Scale of the diffuse term.
    pub diffuse_strength: f32,
    /// Width of the day/night blend in diffuse units.
    pub terminator_width: f32,
    /// RGB multiplier applied on the night side.
    pub night_tint: [f32; 3],
    /// Elevation band thresholds.
    pub bands: BandsConfig,
}

/// Day/night cycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CycleConfig {
    /// Length of a simulated day in seconds (10-3600).
    pub day_length_seconds: f64,
    /// Time of day of the first frame (0.0 - 1.0).
    pub start_time_of_day: f64,
    /// Number of shaded frames to render.
    pub frames: u32,
    /// Simulated seconds between rendered frames.
    pub frame_step_seconds: f64,
}

/// Snapshot output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory PNG snapshots are written to.
    pub directory: PathBuf,
    /// Also write a grayscale elevation image.
    pub write_heightmap: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to the config directory.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: 512,
            height: 256,
            normalization: NormalizationMode::Stretch,
            palette: PaletteMode::Bands,
            threads: 0,
        }
    }
}

impl NoiseLayerConfig {
    fn base() -> Self {
        Self {
            scale: 4.0,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }

    fn detail() -> Self {
        Self {
            scale: 20.0,
            octaves: 8,
            persistence: 0.6,
            lacunarity: 2.0,
        }
    }
}

impl Default for NoiseLayerConfig {
    fn default() -> Self {
        Self::base()
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            base: NoiseLayerConfig::base(),
            detail: NoiseLayerConfig::detail(),
            detail_enabled: true,
            detail_weight: 0.3,
        }
    }
}

impl Default for BandsConfig {
    fn default() -> Self {
        Self {
            deep_water: 0.30,
            shallow_water: 0.45,
            lowland: 0.65,
            highland: 0.85,
        }
    }
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            diffuse_strength: 0.8,
            terminator_width: 0.1,
            night_tint: [0.55, 0.6, 0.9],
            bands: BandsConfig::default(),
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            day_length_seconds: 3600.0,
            start_time_of_day: 0.0,
            frames: 4,
            frame_step_seconds: 900.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            write_heightmap: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

/// Default config directory: the platform config dir joined with `terra`,
/// or `./terra` when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("terra"))
        .unwrap_or_else(|| PathBuf::from("terra"))
}

// --- Validation ---

fn check_range<T>(field: &'static str, value: T, range: RangeInclusive<T>) -> Result<(), ConfigError>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!(
                "{value} is outside {}..={}",
                range.start(),
                range.end()
            ),
        })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} must be finite and > 0"),
        })
    }
}

impl NoiseLayerConfig {
    fn validate(
        &self,
        fields: [&'static str; 4],
    ) -> Result<(), ConfigError> {
        let [octaves, scale, persistence, lacunarity] = fields;
        check_range(octaves, self.octaves, 1..=16)?;
        check_positive(scale, self.scale)?;
        check_positive(persistence, self.persistence)?;
        check_positive(lacunarity, self.lacunarity)?;
        Ok(())
    }
}

impl Config {
    /// Check every setting against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("texture.width", self.texture.width, 512..=8192)?;
        check_range("texture.height", self.texture.height, 256..=4096)?;

        self.noise.base.validate([
            "noise.base.octaves",
            "noise.base.scale",
            "noise.base.persistence",
            "noise.base.lacunarity",
        ])?;
        if self.noise.detail_enabled {
            self.noise.detail.validate([
                "noise.detail.octaves",
                "noise.detail.scale",
                "noise.detail.persistence",
                "noise.detail.lacunarity",
            ])?;
            check_range("noise.detail_weight", self.noise.detail_weight, 0.0..=1.0)?;
        }

        let bands = &self.shading.bands;
        let thresholds = [
            ("shading.bands.deep_water", bands.deep_water),
            ("shading.bands.shallow_water", bands.shallow_water),
            ("shading.bands.lowland", bands.lowland),
            ("shading.bands.highland", bands.highland),
        ];
        let mut floor = 0.0;
        for (field, value) in thresholds {
            check_range(field, value, floor..=1.0)?;
            floor = value;
        }

        check_range("shading.diffuse_strength", self.shading.diffuse_strength, 0.0..=4.0)?;
        check_range("shading.terminator_width", self.shading.terminator_width, 0.001..=1.0)?;
        for channel in self.shading.night_tint {
            check_range("shading.night_tint", channel, 0.0..=1.0)?;
        }

        check_range("cycle.day_length_seconds", self.cycle.day_length_seconds, 10.0..=3600.0)?;
        check_range("cycle.start_time_of_day", self.cycle.start_time_of_day, 0.0..=1.0)?;
        check_range("cycle.frame_step_seconds", self.cycle.frame_step_seconds, 0.0..=3600.0)?;
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: returns `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
