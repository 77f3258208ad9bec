//! Equirectangular texel ↔ unit-sphere mapping.
//!
//! Column `x` maps to longitude `2π·x/width`, so column `width` lands on the
//! same meridian as column 0. Row `y` maps to the colatitude of the texel
//! center, `π·(y + 0.5)/height`, so no row sits exactly on a pole.

use std::f64::consts::{PI, TAU};

use glam::{DVec3, Vec3};

use crate::seed::{det_cos, det_sin};

/// Longitude in radians for a (possibly fractional) column.
#[inline]
pub fn column_longitude(column: f64, width: u32) -> f64 {
    TAU * column / width as f64
}

/// Colatitude in radians (0 at the north pole) for the center of `row`.
#[inline]
pub fn row_colatitude(row: u32, height: u32) -> f64 {
    PI * (row as f64 + 0.5) / height as f64
}

/// Point on the unit sphere for a longitude/colatitude pair.
pub fn sphere_point(longitude: f64, colatitude: f64) -> DVec3 {
    let sin_phi = det_sin(colatitude);
    DVec3::new(
        det_cos(longitude) * sin_phi,
        det_sin(longitude) * sin_phi,
        det_cos(colatitude),
    )
}

/// Unit-sphere point sampled for texel `(column, row)`.
///
/// `column` is fractional so callers can probe the wrap position
/// `column == width`.
pub fn texel_sphere_point(column: f64, row: u32, width: u32, height: u32) -> DVec3 {
    sphere_point(column_longitude(column, width), row_colatitude(row, height))
}

/// Outward surface normal of the unit sphere at the center of texel `(x, y)`.
///
/// Matches the point the generator samples, so shading and terrain agree.
pub fn texel_normal(x: u32, y: u32, width: u32, height: u32) -> Vec3 {
    texel_sphere_point(x as f64, y, width, height)
        .as_vec3()
        .normalize_or_zero()
}
