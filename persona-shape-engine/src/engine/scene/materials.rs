use bevy::prelude::*;

use crate::shape::{HslColor, MaterialSpec, ParticleSpec};

/// Lowest roughness the PBR pipeline handles well.
const MIN_ROUGHNESS: f32 = 0.089;

/// Blinn-Phong exponent to perceptual roughness.
fn roughness_from_shininess(shininess: f32) -> f32 {
    (2.0 / (shininess.max(0.0) + 2.0))
        .sqrt()
        .clamp(MIN_ROUGHNESS, 1.0)
}

fn hsl_color(color: HslColor, alpha: f32) -> Color {
    Color::hsla(color.hue * 360.0, color.saturation, color.lightness, alpha)
}

fn alpha_mode_for(opacity: f32) -> AlphaMode {
    if opacity < 1.0 {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    }
}

/// Untextured shape material; a pattern texture is bound later, once loaded.
pub fn shape_material(spec: &MaterialSpec) -> StandardMaterial {
    StandardMaterial {
        base_color: hsl_color(spec.color, spec.opacity),
        alpha_mode: alpha_mode_for(spec.opacity),
        perceptual_roughness: roughness_from_shininess(spec.shininess),
        metallic: 0.0,
        double_sided: spec.wireframe,
        cull_mode: if spec.wireframe {
            None
        } else {
            Some(bevy::render::render_resource::Face::Back)
        },
        ..default()
    }
}

/// Additive, so overlapping particles brighten instead of occluding.
pub fn particle_material(spec: &ParticleSpec) -> StandardMaterial {
    let [_, r, g, b] = spec.color.to_be_bytes();
    StandardMaterial {
        base_color: Color::srgb_u8(r, g, b).with_alpha(spec.opacity),
        alpha_mode: AlphaMode::Add,
        unlit: true,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(shininess: f32, opacity: f32) -> MaterialSpec {
        MaterialSpec {
            color: HslColor {
                hue: 0.5,
                saturation: 1.0,
                lightness: 0.5,
            },
            opacity,
            shininess,
            wireframe: false,
            pattern: None,
        }
    }

    #[test]
    fn shinier_finishes_are_smoother() {
        let dull = shape_material(&material(10.0, 0.9));
        let glossy = shape_material(&material(100.0, 0.9));
        assert!(glossy.perceptual_roughness < dull.perceptual_roughness);
    }

    #[test]
    fn translucent_shapes_blend() {
        assert_eq!(shape_material(&material(50.0, 0.9)).alpha_mode, AlphaMode::Blend);
        assert_eq!(shape_material(&material(50.0, 1.0)).alpha_mode, AlphaMode::Opaque);
    }

    #[test]
    fn particle_colour_comes_from_the_packed_rgb() {
        let spec = ParticleSpec {
            count: 50,
            size: 0.05,
            color: 0xF5A623,
            opacity: 0.6,
            extent: 4.0,
        };
        let srgba = particle_material(&spec).base_color.to_srgba();
        assert!((srgba.red - 245.0 / 255.0).abs() < 1e-3);
        assert!((srgba.alpha - 0.6).abs() < 1e-6);
    }

    #[test]
    fn particles_blend_additively() {
        let spec = ParticleSpec {
            count: 50,
            size: 0.05,
            color: 0xFFFFFF,
            opacity: 1.0,
            extent: 4.0,
        };
        assert_eq!(particle_material(&spec).alpha_mode, AlphaMode::Add);
    }
}
