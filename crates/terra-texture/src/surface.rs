//! Surface classification: elevation bands and their base colors.

use glam::Vec3;

use crate::error::TextureError;

/// Discrete surface type derived from a normalized elevation value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceClass {
    DeepWater,
    ShallowWater,
    Lowland,
    Highland,
    PolarCap,
}

impl SurfaceClass {
    /// All classes in ascending elevation order.
    pub const ALL: [SurfaceClass; 5] = [
        SurfaceClass::DeepWater,
        SurfaceClass::ShallowWater,
        SurfaceClass::Lowland,
        SurfaceClass::Highland,
        SurfaceClass::PolarCap,
    ];

    /// Base albedo in linear RGB, each channel in `[0, 1]`.
    pub fn base_color(self) -> Vec3 {
        match self {
            Self::DeepWater => Vec3::new(0.04, 0.10, 0.35),
            Self::ShallowWater => Vec3::new(0.12, 0.35, 0.65),
            Self::Lowland => Vec3::new(0.20, 0.50, 0.18),
            Self::Highland => Vec3::new(0.45, 0.38, 0.28),
            Self::PolarCap => Vec3::new(0.92, 0.94, 0.97),
        }
    }

    /// Short lowercase name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::DeepWater => "deep_water",
            Self::ShallowWater => "shallow_water",
            Self::Lowland => "lowland",
            Self::Highland => "highland",
            Self::PolarCap => "polar_cap",
        }
    }
}

/// Upper-exclusive thresholds splitting `[0, 1]` into the five classes.
///
/// A value `v` belongs to `DeepWater` when `v < deep_water`, to
/// `ShallowWater` when `deep_water <= v < shallow_water`, and so on, with
/// `PolarCap` taking everything from `highland` up to and including 1.
/// Thresholds are non-decreasing, so the bands never overlap or leave a gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceBands {
    deep_water: f32,
    shallow_water: f32,
    lowland: f32,
    highland: f32,
}

impl SurfaceBands {
    /// Build bands from four thresholds.
    ///
    /// Fails with [`TextureError::InvalidParameter`] if any threshold is
    /// outside `[0, 1]` or they are not non-decreasing.
    pub fn new(
        deep_water: f32,
        shallow_water: f32,
        lowland: f32,
        highland: f32,
    ) -> Result<Self, TextureError> {
        let named = [
            ("bands.deep_water", deep_water),
            ("bands.shallow_water", shallow_water),
            ("bands.lowland", lowland),
            ("bands.highland", highland),
        ];
        for (name, value) in named {
            if !(0.0..=1.0).contains(&value) {
                return Err(TextureError::invalid(
                    name,
                    format!("must lie in [0, 1], got {value}"),
                ));
            }
        }
        for pair in named.windows(2) {
            let (lower_name, lower) = pair[0];
            let (name, value) = pair[1];
            if value < lower {
                return Err(TextureError::invalid(
                    name,
                    format!("must be >= {lower_name} ({lower}), got {value}"),
                ));
            }
        }
        Ok(Self {
            deep_water,
            shallow_water,
            lowland,
            highland,
        })
    }

    /// Thresholds in ascending order.
    pub fn thresholds(&self) -> [f32; 4] {
        [self.deep_water, self.shallow_water, self.lowland, self.highland]
    }

    /// Classify a normalized elevation. Values outside `[0, 1]` are clamped
    /// first; NaN is treated as 0.
    pub fn classify(&self, value: f32) -> SurfaceClass {
        let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        if v < self.deep_water {
            SurfaceClass::DeepWater
        } else if v < self.shallow_water {
            SurfaceClass::ShallowWater
        } else if v < self.lowland {
            SurfaceClass::Lowland
        } else if v < self.highland {
            SurfaceClass::Highland
        } else {
            SurfaceClass::PolarCap
        }
    }

    /// `[lower, upper)` range covered by `class` (`PolarCap` includes 1).
    pub fn range(&self, class: SurfaceClass) -> (f32, f32) {
        match class {
            SurfaceClass::DeepWater => (0.0, self.deep_water),
            SurfaceClass::ShallowWater => (self.deep_water, self.shallow_water),
            SurfaceClass::Lowland => (self.shallow_water, self.lowland),
            SurfaceClass::Highland => (self.lowland, self.highland),
            SurfaceClass::PolarCap => (self.highland, 1.0),
        }
    }
}

impl Default for SurfaceBands {
    fn default() -> Self {
        Self {
            deep_water: 0.30,
            shallow_water: 0.45,
            lowland: 0.65,
            highland: 0.85,
        }
    }
}

/// One classified texel of a height map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSample {
    /// Normalized elevation in `[0, 1]`.
    pub value: f32,
    /// Class derived from `value`.
    pub class: SurfaceClass,
}

impl SurfaceSample {
    /// Classify `value` against `bands`.
    pub fn classify(value: f32, bands: &SurfaceBands) -> Self {
        Self {
            value,
            class: bands.classify(value),
        }
    }

    /// Base color of this sample's class.
    pub fn base_color(&self) -> Vec3 {
        self.class.base_color()
    }
}

/// Pack a linear `[0, 1]` color into opaque RGBA8. Channels are clamped and
/// NaN maps to 0.
pub fn color_to_rgba8(color: Vec3) -> [u8; 4] {
    let channel = |c: f32| {
        if c.is_nan() {
            0
        } else {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
    };
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands_are_monotonic() {
        let t = SurfaceBands::default().thresholds();
        assert!(t.windows(2).all(|w| w[0] <= w[1]));
        assert!(t.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_classes_cover_range_without_gaps() {
        let bands = SurfaceBands::default();
        let mut expected_lower = 0.0;
        for class in SurfaceClass::ALL {
            let (lower, upper) = bands.range(class);
            assert_eq!(lower, expected_lower, "{} leaves a gap", class.name());
            assert!(upper >= lower);
            expected_lower = upper;
        }
        assert_eq!(expected_lower, 1.0);
    }

    #[test]
    fn test_classification_is_non_decreasing() {
        let bands = SurfaceBands::default();
        let mut previous = SurfaceClass::DeepWater;
        for i in 0..=1000 {
            let class = bands.classify(i as f32 / 1000.0);
            assert!(class >= previous, "class went down at {i}");
            previous = class;
        }
        assert_eq!(previous, SurfaceClass::PolarCap);
    }

    #[test]
    fn test_classify_matches_ranges() {
        let bands = SurfaceBands::default();
        for i in 0..=200 {
            let v = i as f32 / 200.0;
            let class = bands.classify(v);
            let (lower, upper) = bands.range(class);
            let inside = v >= lower && (v < upper || (class == SurfaceClass::PolarCap && v <= upper));
            assert!(inside, "{v} classified as {} outside its band", class.name());
        }
    }

    #[test]
    fn test_threshold_boundaries() {
        let bands = SurfaceBands::new(0.2, 0.4, 0.6, 0.8).unwrap();
        assert_eq!(bands.classify(0.0), SurfaceClass::DeepWater);
        assert_eq!(bands.classify(0.2), SurfaceClass::ShallowWater);
        assert_eq!(bands.classify(0.4), SurfaceClass::Lowland);
        assert_eq!(bands.classify(0.6), SurfaceClass::Highland);
        assert_eq!(bands.classify(0.8), SurfaceClass::PolarCap);
        assert_eq!(bands.classify(1.0), SurfaceClass::PolarCap);
    }

    #[test]
    fn test_collapsed_band_is_allowed() {
        let bands = SurfaceBands::new(0.3, 0.3, 0.6, 0.9).unwrap();
        assert_eq!(bands.classify(0.3), SurfaceClass::Lowland);
        assert_eq!(bands.classify(0.29), SurfaceClass::DeepWater);
    }

    #[test]
    fn test_rejects_decreasing_thresholds() {
        let err = SurfaceBands::new(0.5, 0.4, 0.6, 0.8).unwrap_err();
        assert!(matches!(
            err,
            TextureError::InvalidParameter {
                name: "bands.shallow_water",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        assert!(SurfaceBands::new(-0.1, 0.4, 0.6, 0.8).is_err());
        assert!(SurfaceBands::new(0.1, 0.4, 0.6, 1.2).is_err());
        assert!(SurfaceBands::new(0.1, f32::NAN, 0.6, 0.8).is_err());
    }

    #[test]
    fn test_classify_clamps_out_of_range_values() {
        let bands = SurfaceBands::default();
        assert_eq!(bands.classify(-3.0), SurfaceClass::DeepWater);
        assert_eq!(bands.classify(7.0), SurfaceClass::PolarCap);
        assert_eq!(bands.classify(f32::NAN), SurfaceClass::DeepWater);
    }

    #[test]
    fn test_base_colors_in_display_range() {
        for class in SurfaceClass::ALL {
            let c = class.base_color();
            assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_color_to_rgba8() {
        assert_eq!(color_to_rgba8(Vec3::ONE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba8(Vec3::new(-1.0, 2.0, f32::NAN)), [0, 255, 0, 255]);
    }
}
