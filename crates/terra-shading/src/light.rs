//! Validated sun direction.

use glam::Vec3;

use crate::error::ShadingError;

/// Allowed deviation of a light direction's length from 1.
pub const UNIT_TOLERANCE: f32 = 1e-4;

/// Unit vector pointing from the surface toward the sun, in planet-local
/// space.
///
/// The only way to obtain one is through validation, so the shading model
/// never sees a non-unit light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightDirection(Vec3);

impl LightDirection {
    /// Sun along the +X axis.
    pub const POSITIVE_X: Self = Self(Vec3::X);

    /// Validate that `direction` is finite and unit length within
    /// [`UNIT_TOLERANCE`].
    pub fn new(direction: Vec3) -> Result<Self, ShadingError> {
        if !direction.is_finite() {
            return Err(ShadingError::invalid(
                "light_direction",
                format!("components must be finite, got {direction}"),
            ));
        }
        let length = direction.length();
        if (length - 1.0).abs() > UNIT_TOLERANCE {
            return Err(ShadingError::invalid(
                "light_direction",
                format!("must be unit length, got length {length}"),
            ));
        }
        Ok(Self(direction))
    }

    /// Normalize an arbitrary non-zero, finite vector into a light direction.
    pub fn from_unnormalized(direction: Vec3) -> Result<Self, ShadingError> {
        match direction.try_normalize() {
            Some(unit) => Ok(Self(unit)),
            None => Err(ShadingError::invalid(
                "light_direction",
                format!("cannot normalize {direction}"),
            )),
        }
    }

    /// The underlying unit vector.
    pub fn as_vec3(self) -> Vec3 {
        self.0
    }
}

impl TryFrom<Vec3> for LightDirection {
    type Error = ShadingError;

    fn try_from(direction: Vec3) -> Result<Self, Self::Error> {
        Self::new(direction)
    }
}

impl From<LightDirection> for Vec3 {
    fn from(light: LightDirection) -> Self {
        light.0
    }
}
