//! Whole-texture shading pass.

use glam::Vec3;
use terra_texture::{HeightMap, SurfaceBands, color_to_rgba8, texel_normal};

use crate::light::LightDirection;
use crate::model::ShadingModel;

/// Shade every texel of `map` for one light direction.
///
/// Normals come from the same equirectangular mapping the generator samples
/// with, so the lit hemisphere lines up with the terrain. Returns row-major
/// RGBA8 pixels.
pub fn render_frame(
    map: &HeightMap,
    bands: &SurfaceBands,
    model: &ShadingModel,
    light: LightDirection,
) -> Vec<[u8; 4]> {
    let (width, height) = map.dimensions();
    let mut pixels = Vec::with_capacity(map.len());
    for y in 0..height {
        for x in 0..width {
            let color = match map.sample(x, y, bands) {
                Some(sample) => model.shade_lit(&sample, light, texel_normal(x, y, width, height)),
                None => Vec3::ZERO,
            };
            pixels.push(color_to_rgba8(color));
        }
    }
    pixels
}

/// Fraction of texels on the day side of the terminator.
pub fn lit_fraction(map: &HeightMap, light: LightDirection) -> f32 {
    let (width, height) = map.dimensions();
    if map.is_empty() {
        return 0.0;
    }
    let lit = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&(x, y)| texel_normal(x, y, width, height).dot(light.as_vec3()) > 0.0)
        .count();
    lit as f32 / map.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_texture::{SurfaceNoise, TextureParams, generate_height_map};

    fn map() -> HeightMap {
        generate_height_map(&SurfaceNoise::new(21), TextureParams::single_layer(64, 32, 4)).unwrap()
    }

    #[test]
    fn test_frame_has_one_pixel_per_texel() {
        let map = map();
        let light = LightDirection::new(Vec3::X).unwrap();
        let pixels = render_frame(&map, &SurfaceBands::default(), &ShadingModel::default(), light);
        assert_eq!(pixels.len(), 64 * 32);
        assert!(pixels.iter().all(|p| p[3] == 255));
    }

    #[test]
    fn test_about_half_the_planet_is_lit() {
        let map = map();
        let light = LightDirection::new(Vec3::X).unwrap();
        let fraction = lit_fraction(&map, light);
        assert!((fraction - 0.5).abs() < 0.05, "lit fraction {fraction}");
    }

    #[test]
    fn test_sub_solar_texel_brighter_than_antipode() {
        let map = map();
        let bands = SurfaceBands::default();
        let model = ShadingModel::default();
        // Column 0 faces +X, column width/2 faces -X.
        let light = LightDirection::new(Vec3::X).unwrap();
        let pixels = render_frame(&map, &bands, &model, light);
        let y = 16;
        let day = map.sample(0, y, &bands).unwrap();
        let night = map.sample(32, y, &bands).unwrap();
        let day_px = pixels[(y * 64) as usize];
        let night_px = pixels[(y * 64 + 32) as usize];
        assert_eq!(
            day_px,
            color_to_rgba8(model.shade_lit(&day, light, texel_normal(0, y, 64, 32)))
        );
        assert_eq!(night_px, color_to_rgba8(model.night_color(&night)));
    }
}
