//! Per-texel day/night shading.
//!
//! The surface color is lit by a Lambert diffuse term on the day side and
//! falls back to a tinted ambient color on the night side. Across the
//! terminator the two are blended with a smoothstep over
//! `[0, terminator_width]` of the diffuse term, so any texel facing away
//! from the sun gets exactly the night color.

use glam::Vec3;
use terra_texture::SurfaceSample;

use crate::error::ShadingError;
use crate::light::LightDirection;

/// Tunable constants of the shading model.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadingParams {
    /// Ambient light level applied on both sides of the terminator.
    pub ambient: f32,
    /// Scale of the diffuse term on the day side.
    pub diffuse_strength: f32,
    /// Width of the terminator blend, measured in diffuse units.
    pub terminator_width: f32,
    /// Per-channel multiplier applied to the ambient color at night.
    pub night_tint: Vec3,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            ambient: 0.2,
            diffuse_strength: 0.8,
            terminator_width: 0.1,
            night_tint: Vec3::new(0.55, 0.6, 0.9),
        }
    }
}

impl ShadingParams {
    /// Reject negative, non-finite, or degenerate parameters.
    pub fn validate(&self) -> Result<(), ShadingError> {
        non_negative("ambient", self.ambient)?;
        non_negative("diffuse_strength", self.diffuse_strength)?;
        if !self.terminator_width.is_finite() || self.terminator_width <= 0.0 {
            return Err(ShadingError::invalid(
                "terminator_width",
                format!("must be finite and > 0, got {}", self.terminator_width),
            ));
        }
        if !self.night_tint.is_finite() || self.night_tint.min_element() < 0.0 {
            return Err(ShadingError::invalid(
                "night_tint",
                format!("channels must be finite and >= 0, got {}", self.night_tint),
            ));
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ShadingError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ShadingError::invalid(
            name,
            format!("must be finite and >= 0, got {value}"),
        ));
    }
    Ok(())
}

/// Stateless shading function with validated parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShadingModel {
    params: ShadingParams,
}

impl ShadingModel {
    pub fn new(params: ShadingParams) -> Result<Self, ShadingError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ShadingParams {
        &self.params
    }

    /// Copy of this model with a different ambient level, as driven by the
    /// day/night cycle.
    pub fn with_ambient(&self, ambient: f32) -> Result<Self, ShadingError> {
        Self::new(ShadingParams {
            ambient,
            ..self.params.clone()
        })
    }

    /// Shade one texel against a raw light vector.
    ///
    /// Fails with [`ShadingError::InvalidInput`] if `light` is not unit
    /// length. `normal` is expected to be unit length; any other magnitude
    /// (including NaN) still yields a color inside `[0, 1]`.
    pub fn shade(
        &self,
        sample: &SurfaceSample,
        light: Vec3,
        normal: Vec3,
    ) -> Result<Vec3, ShadingError> {
        let light = LightDirection::new(light)?;
        Ok(self.shade_lit(sample, light, normal))
    }

    /// Shade one texel against an already validated light direction.
    pub fn shade_lit(&self, sample: &SurfaceSample, light: LightDirection, normal: Vec3) -> Vec3 {
        let base = sample.base_color();
        let diffuse = diffuse_term(normal, light);
        let p = &self.params;

        let dark = base * p.ambient * p.night_tint;
        let lit = base * (p.ambient + p.diffuse_strength * diffuse);
        let t = smoothstep(0.0, p.terminator_width, diffuse);

        sanitize(dark.lerp(lit, t))
    }

    /// The color a texel takes on the night side of the terminator.
    pub fn night_color(&self, sample: &SurfaceSample) -> Vec3 {
        let p = &self.params;
        sanitize(sample.base_color() * p.ambient * p.night_tint)
    }
}

/// `max(n · l, 0)`, with non-finite products treated as 0.
pub fn diffuse_term(normal: Vec3, light: LightDirection) -> f32 {
    let d = normal.dot(light.as_vec3());
    if d.is_finite() { d.max(0.0) } else { 0.0 }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn sanitize(color: Vec3) -> Vec3 {
    let channel = |c: f32| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
    Vec3::new(channel(color.x), channel(color.y), channel(color.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_texture::{SurfaceBands, SurfaceClass};

    fn sample(class: SurfaceClass) -> SurfaceSample {
        let bands = SurfaceBands::default();
        let (lower, upper) = bands.range(class);
        SurfaceSample::classify((lower + upper) * 0.5, &bands)
    }

    fn in_display_range(c: Vec3) -> bool {
        c.is_finite() && c.min_element() >= 0.0 && c.max_element() <= 1.0
    }

    #[test]
    fn test_non_unit_light_rejected() {
        let model = ShadingModel::default();
        let err = model
            .shade(&sample(SurfaceClass::Lowland), Vec3::new(0.0, 0.0, -2.0), Vec3::Z)
            .unwrap_err();
        assert!(matches!(err, ShadingError::InvalidInput { .. }));
    }

    #[test]
    fn test_facing_away_equals_night_color() {
        let model = ShadingModel::default();
        let s = sample(SurfaceClass::Lowland);
        // n · l = -0.3
        let normal = Vec3::Z;
        let light = Vec3::new((1.0_f32 - 0.09).sqrt(), 0.0, -0.3);
        let color = model.shade(&s, light, normal).unwrap();
        assert_eq!(color, model.night_color(&s));
    }

    #[test]
    fn test_full_sun_is_brighter_than_night() {
        let model = ShadingModel::default();
        let s = sample(SurfaceClass::Highland);
        let day = model.shade(&s, Vec3::Z, Vec3::Z).unwrap();
        let night = model.shade(&s, Vec3::NEG_Z, Vec3::Z).unwrap();
        assert!(day.element_sum() > night.element_sum());
        let expected = s.base_color() * (0.2 + 0.8);
        assert!((day - expected).length() < 1e-6);
    }

    #[test]
    fn test_terminator_is_continuous() {
        let model = ShadingModel::default();
        let s = sample(SurfaceClass::ShallowWater);
        let mut previous = model.night_color(&s);
        for i in 0..=400 {
            let angle = std::f32::consts::FRAC_PI_2 - i as f32 * 0.0025;
            let light = Vec3::new(angle.sin(), 0.0, angle.cos());
            let color = model.shade(&s, light, Vec3::Z).unwrap();
            assert!((color - previous).length() < 0.05, "jump at step {i}");
            previous = color;
        }
    }

    #[test]
    fn test_output_in_range_for_unit_inputs() {
        let model = ShadingModel::default();
        for class in SurfaceClass::ALL {
            let s = sample(class);
            for i in 0..64 {
                let a = i as f32 * 0.1;
                let light = Vec3::new(a.cos(), a.sin() * 0.6, a.sin() * 0.8);
                let normal = Vec3::new(a.sin(), 0.0, a.cos());
                let color = model.shade(&s, light.normalize(), normal).unwrap();
                assert!(in_display_range(color), "{class:?}: {color}");
            }
        }
    }

    #[test]
    fn test_oversized_or_nan_normal_stays_in_range() {
        let model = ShadingModel::new(ShadingParams {
            ambient: 0.9,
            diffuse_strength: 5.0,
            ..ShadingParams::default()
        })
        .unwrap();
        let s = sample(SurfaceClass::PolarCap);
        let huge = model.shade(&s, Vec3::Z, Vec3::Z * 1e30).unwrap();
        assert!(in_display_range(huge));
        let nan = model.shade(&s, Vec3::Z, Vec3::splat(f32::NAN)).unwrap();
        assert!(in_display_range(nan));
        assert_eq!(nan, model.night_color(&s));
    }

    #[test]
    fn test_diffuse_term_clamps_negative() {
        let light = LightDirection::new(Vec3::NEG_Z).unwrap();
        assert_eq!(diffuse_term(Vec3::Z, light), 0.0);
        assert_eq!(diffuse_term(Vec3::NEG_Z, light), 1.0);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let negative = ShadingParams {
            ambient: -0.1,
            ..ShadingParams::default()
        };
        assert!(ShadingModel::new(negative).is_err());
        let zero_width = ShadingParams {
            terminator_width: 0.0,
            ..ShadingParams::default()
        };
        assert!(ShadingModel::new(zero_width).is_err());
    }

    #[test]
    fn test_with_ambient() {
        let model = ShadingModel::default().with_ambient(0.35).unwrap();
        assert_eq!(model.params().ambient, 0.35);
        assert!(ShadingModel::default().with_ambient(f32::NAN).is_err());
    }
}
