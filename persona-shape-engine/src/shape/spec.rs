use bevy::math::Vec3;
use constants::shape_tuning::{
    MAX_KNOT_WINDING, MAX_PARTICLES, MAX_POLYHEDRON_DETAIL, MAX_RADIAL_SEGMENTS,
    MAX_SPHERE_SEGMENTS, MAX_TUBULAR_SEGMENTS,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    Octahedron,
    Icosahedron,
    TorusKnot,
    Sphere,
    Box,
    Dodecahedron,
}

/// Geometry with the parameters of its kind. The kind is the variant, so the
/// two cannot disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometrySpec {
    Octahedron {
        radius: f32,
        detail: u32,
    },
    Icosahedron {
        radius: f32,
        detail: u32,
    },
    Dodecahedron {
        radius: f32,
        detail: u32,
    },
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
}

impl GeometrySpec {
    pub fn kind(&self) -> GeometryKind {
        match self {
            GeometrySpec::Octahedron { .. } => GeometryKind::Octahedron,
            GeometrySpec::Icosahedron { .. } => GeometryKind::Icosahedron,
            GeometrySpec::Dodecahedron { .. } => GeometryKind::Dodecahedron,
            GeometrySpec::TorusKnot { .. } => GeometryKind::TorusKnot,
            GeometrySpec::Sphere { .. } => GeometryKind::Sphere,
            GeometrySpec::Box { .. } => GeometryKind::Box,
        }
    }

    fn validate(&self) -> Result<(), ShapeSpecError> {
        match *self {
            GeometrySpec::Octahedron { radius, detail }
            | GeometrySpec::Icosahedron { radius, detail }
            | GeometrySpec::Dodecahedron { radius, detail } => {
                positive("radius", radius)?;
                if detail > MAX_POLYHEDRON_DETAIL {
                    return Err(ShapeSpecError::OutOfRange {
                        field: "detail",
                        value: detail as f32,
                    });
                }
            }
            GeometrySpec::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => {
                positive("radius", radius)?;
                positive("tube", tube)?;
                within("tubular_segments", tubular_segments, 3, MAX_TUBULAR_SEGMENTS)?;
                within("radial_segments", radial_segments, 3, MAX_RADIAL_SEGMENTS)?;
                within("p", p, 1, MAX_KNOT_WINDING)?;
                within("q", q, 1, MAX_KNOT_WINDING)?;
            }
            GeometrySpec::Sphere {
                radius,
                width_segments,
                height_segments,
            } => {
                positive("radius", radius)?;
                within("width_segments", width_segments, 3, MAX_SPHERE_SEGMENTS)?;
                within("height_segments", height_segments, 2, MAX_SPHERE_SEGMENTS)?;
            }
            GeometrySpec::Box {
                width,
                height,
                depth,
            } => {
                positive("width", width)?;
                positive("height", height)?;
                positive("depth", depth)?;
            }
        }
        Ok(())
    }
}

/// HSL colour, every component in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslColor {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

/// Repeating surface pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub path: String,
    pub repeat: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub color: HslColor,
    pub opacity: f32,
    pub shininess: f32,
    pub wireframe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleSpec {
    pub count: u32,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub opacity: f32,
    /// Half-width of the cube the particles are scattered in.
    pub extent: f32,
}

impl ParticleSpec {
    /// Uniformly random positions inside the extent cube. Drawn anew on every
    /// call; this is the only non-deterministic part of a shape.
    pub fn scatter<R: Rng>(&self, rng: &mut R) -> Vec<Vec3> {
        let e = self.extent;
        (0..self.count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-e..=e),
                    rng.gen_range(-e..=e),
                    rng.gen_range(-e..=e),
                )
            })
            .collect()
    }
}

/// Rotation speeds in radians per second; amplitude 0 disables pulsation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionSpec {
    pub rotation_speed: f32,
    pub particle_rotation_speed: f32,
    pub pulsation_amplitude: f32,
    pub pulsation_frequency: f32,
}

/// Complete, declarative description of one visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub geometry: GeometrySpec,
    pub material: MaterialSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particles: Option<ParticleSpec>,
    pub motion: MotionSpec,
}

impl ShapeSpec {
    /// Check an externally supplied spec before it reaches the GPU.
    pub fn validate(&self) -> Result<(), ShapeSpecError> {
        self.geometry.validate()?;

        let material = &self.material;
        unit("material.opacity", material.opacity)?;
        unit("material.color.hue", material.color.hue)?;
        unit("material.color.saturation", material.color.saturation)?;
        unit("material.color.lightness", material.color.lightness)?;
        non_negative("material.shininess", material.shininess)?;
        if let Some(pattern) = &material.pattern {
            if pattern.path.trim().is_empty() {
                return Err(ShapeSpecError::EmptyPatternPath);
            }
            positive("material.pattern.repeat", pattern.repeat)?;
        }

        if let Some(particles) = &self.particles {
            if particles.count > MAX_PARTICLES {
                return Err(ShapeSpecError::OutOfRange {
                    field: "particles.count",
                    value: particles.count as f32,
                });
            }
            positive("particles.size", particles.size)?;
            unit("particles.opacity", particles.opacity)?;
            positive("particles.extent", particles.extent)?;
            if particles.color > 0xFF_FF_FF {
                return Err(ShapeSpecError::OutOfRange {
                    field: "particles.color",
                    value: particles.color as f32,
                });
            }
        }

        let motion = &self.motion;
        finite("motion.rotation_speed", motion.rotation_speed)?;
        finite("motion.particle_rotation_speed", motion.particle_rotation_speed)?;
        non_negative("motion.pulsation_amplitude", motion.pulsation_amplitude)?;
        if motion.pulsation_amplitude >= 1.0 {
            // Scale would reach zero or flip.
            return Err(ShapeSpecError::OutOfRange {
                field: "motion.pulsation_amplitude",
                value: motion.pulsation_amplitude,
            });
        }
        finite("motion.pulsation_frequency", motion.pulsation_frequency)?;
        Ok(())
    }
}

/// Validation failures for shape specs that did not come from the mapper.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeSpecError {
    NotFinite { field: &'static str },
    OutOfRange { field: &'static str, value: f32 },
    EmptyPatternPath,
}

impl std::fmt::Display for ShapeSpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeSpecError::NotFinite { field } => write!(f, "{} must be a finite number", field),
            ShapeSpecError::OutOfRange { field, value } => {
                write!(f, "{} is out of range ({})", field, value)
            }
            ShapeSpecError::EmptyPatternPath => write!(f, "Pattern texture path is empty"),
        }
    }
}

impl std::error::Error for ShapeSpecError {}

fn finite(field: &'static str, value: f32) -> Result<(), ShapeSpecError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ShapeSpecError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ShapeSpecError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ShapeSpecError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ShapeSpecError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ShapeSpecError::OutOfRange { field, value })
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ShapeSpecError> {
    finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ShapeSpecError::OutOfRange { field, value })
    }
}

fn within(
    field: &'static str,
    value: u32,
    minimum: u32,
    maximum: u32,
) -> Result<(), ShapeSpecError> {
    if (minimum..=maximum).contains(&value) {
        Ok(())
    } else {
        Err(ShapeSpecError::OutOfRange {
            field,
            value: value as f32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personality::PersonalityProfile;
    use crate::shape::map_profile;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample() -> ShapeSpec {
        map_profile(&PersonalityProfile::uniform(60))
    }

    #[test]
    fn mapped_spec_is_valid() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn rejects_nan_radius() {
        let mut spec = sample();
        spec.geometry = GeometrySpec::Sphere {
            radius: f32::NAN,
            width_segments: 16,
            height_segments: 8,
        };
        assert_eq!(
            spec.validate(),
            Err(ShapeSpecError::NotFinite { field: "radius" })
        );
    }

    #[test]
    fn rejects_opacity_above_one() {
        let mut spec = sample();
        spec.material.opacity = 1.5;
        assert!(matches!(
            spec.validate(),
            Err(ShapeSpecError::OutOfRange {
                field: "material.opacity",
                ..
            })
        ));
    }

    #[test]
    fn rejects_degenerate_box() {
        let mut spec = sample();
        spec.geometry = GeometrySpec::Box {
            width: 1.0,
            height: 0.0,
            depth: 1.0,
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn rejects_particle_count_above_ceiling() {
        let mut spec = sample();
        if let Some(particles) = spec.particles.as_mut() {
            particles.count = MAX_PARTICLES + 1;
        }
        assert!(spec.validate().is_err());
    }

    #[test]
    fn rejects_tessellation_above_ceiling() {
        let knot = |tubular_segments, radial_segments, p| GeometrySpec::TorusKnot {
            radius: 2.0,
            tube: 0.4,
            tubular_segments,
            radial_segments,
            p,
            q: 3,
        };
        let mut spec = sample();

        spec.geometry = knot(u32::MAX - 1, 3, 2);
        assert_eq!(
            spec.validate(),
            Err(ShapeSpecError::OutOfRange {
                field: "tubular_segments",
                value: (u32::MAX - 1) as f32,
            })
        );

        spec.geometry = knot(64, MAX_RADIAL_SEGMENTS + 1, 2);
        assert!(spec.validate().is_err());

        spec.geometry = knot(64, 8, MAX_KNOT_WINDING + 1);
        assert!(spec.validate().is_err());

        spec.geometry = knot(MAX_TUBULAR_SEGMENTS, MAX_RADIAL_SEGMENTS, MAX_KNOT_WINDING);
        assert_eq!(spec.validate(), Ok(()));

        spec.geometry = GeometrySpec::Sphere {
            radius: 1.0,
            width_segments: 32,
            height_segments: MAX_SPHERE_SEGMENTS + 1,
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn geometry_json_is_tagged_by_kind() {
        let geometry = GeometrySpec::Dodecahedron {
            radius: 1.5,
            detail: 1,
        };
        let json = serde_json::to_value(&geometry).unwrap();
        assert_eq!(json["kind"], "dodecahedron");

        let back: GeometrySpec = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), GeometryKind::Dodecahedron);
    }

    #[test]
    fn scatter_stays_within_extent() {
        let particles = ParticleSpec {
            count: 200,
            size: 0.05,
            color: 0xFFFFFF,
            opacity: 0.7,
            extent: 4.0,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let positions = particles.scatter(&mut rng);

        assert_eq!(positions.len(), 200);
        assert!(positions.iter().all(|p| p.abs().max_element() <= 4.0));
    }

    #[test]
    fn scatter_differs_between_draws() {
        let particles = sample().particles.unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let first = particles.scatter(&mut rng);
        let second = particles.scatter(&mut rng);
        assert_ne!(first, second);
    }
}
