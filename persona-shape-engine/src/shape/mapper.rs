use constants::shape_tuning::*;

use super::spec::{
    GeometrySpec, HslColor, MaterialSpec, MotionSpec, ParticleSpec, PatternSpec, ShapeSpec,
};
use crate::personality::PersonalityProfile;

/// Map a profile to its shape. Pure and total: the same profile always
/// yields an identical spec, and every profile in range yields a valid one.
pub fn map_profile(profile: &PersonalityProfile) -> ShapeSpec {
    ShapeSpec {
        geometry: geometry_for_openness(profile.openness),
        material: MaterialSpec {
            color: color_for_neuroticism(profile.neuroticism),
            opacity: SHAPE_OPACITY,
            shininess: shininess_for_conscientiousness(profile.conscientiousness),
            wireframe: profile.conscientiousness < WIREFRAME_BELOW_CONSCIENTIOUSNESS,
            pattern: pattern_for_agreeableness(profile.agreeableness),
        },
        particles: Some(particles_for(profile.extroversion, profile.agreeableness)),
        motion: MotionSpec {
            rotation_speed: SHAPE_ROTATION_SPEED,
            particle_rotation_speed: PARTICLE_ROTATION_SPEED,
            pulsation_amplitude: fraction(profile.neuroticism) * MAX_PULSATION_AMPLITUDE,
            pulsation_frequency: PULSATION_FREQUENCY,
        },
    }
}

fn fraction(percentage: u8) -> f32 {
    f32::from(percentage.min(100)) / 100.0
}

/// Position of `score` inside the tier `[start, end)` as 0..1.
fn tier_progress(score: u8, start: u8, end: u8) -> f32 {
    let span = f32::from(end.saturating_sub(start).max(1));
    (f32::from(score.saturating_sub(start)) / span).clamp(0.0, 1.0)
}

fn grown_segments(base: u32, progress: f32) -> u32 {
    base + (base as f32 * KNOT_SEGMENT_GROWTH * progress).round() as u32
}

fn geometry_for_openness(openness: u8) -> GeometrySpec {
    if openness < OPENNESS_ICOSAHEDRON_THRESHOLD {
        GeometrySpec::Octahedron {
            radius: BASE_SIZE,
            detail: 0,
        }
    } else if openness < OPENNESS_KNOT_THRESHOLD {
        GeometrySpec::Icosahedron {
            radius: BASE_SIZE,
            detail: 0,
        }
    } else if openness < OPENNESS_COMPLEX_KNOT_THRESHOLD {
        let progress = tier_progress(
            openness,
            OPENNESS_KNOT_THRESHOLD,
            OPENNESS_COMPLEX_KNOT_THRESHOLD,
        );
        GeometrySpec::TorusKnot {
            radius: BASE_SIZE,
            tube: KNOT_TUBE,
            tubular_segments: grown_segments(KNOT_TUBULAR_SEGMENTS, progress),
            radial_segments: KNOT_RADIAL_SEGMENTS,
            p: KNOT_P,
            q: KNOT_Q,
        }
    } else {
        let progress = tier_progress(openness, OPENNESS_COMPLEX_KNOT_THRESHOLD, 100);
        GeometrySpec::TorusKnot {
            radius: BASE_SIZE * COMPLEX_KNOT_RADIUS_SCALE,
            tube: COMPLEX_KNOT_TUBE,
            tubular_segments: grown_segments(COMPLEX_KNOT_TUBULAR_SEGMENTS, progress),
            radial_segments: COMPLEX_KNOT_RADIAL_SEGMENTS,
            p: COMPLEX_KNOT_P,
            q: COMPLEX_KNOT_Q,
        }
    }
}

/// Calm scores sit between blue and the neutral midpoint, volatile scores
/// between the midpoint and red.
fn color_for_neuroticism(neuroticism: u8) -> HslColor {
    let n = f32::from(neuroticism.min(100));
    let hue = if n <= 50.0 {
        CALM_HUE - (n / 50.0) * (CALM_HUE - NEUTRAL_HUE)
    } else {
        NEUTRAL_HUE - ((n - 50.0) / 50.0) * (NEUTRAL_HUE - VOLATILE_HUE)
    };
    HslColor {
        hue,
        saturation: SHAPE_SATURATION,
        lightness: SHAPE_LIGHTNESS,
    }
}

fn shininess_for_conscientiousness(conscientiousness: u8) -> f32 {
    MIN_SHININESS + fraction(conscientiousness) * (MAX_SHININESS - MIN_SHININESS)
}

/// Higher agreeableness packs the dots more densely; zero shows no pattern.
fn pattern_for_agreeableness(agreeableness: u8) -> Option<PatternSpec> {
    (agreeableness > 0).then(|| PatternSpec {
        path: PATTERN_TEXTURE_PATH.to_string(),
        repeat: 1.0 + fraction(agreeableness) * MAX_PATTERN_REPEAT_GAIN,
    })
}

fn particles_for(extroversion: u8, agreeableness: u8) -> ParticleSpec {
    let e = u32::from(extroversion.min(100));
    let count = (MIN_PARTICLES + e * (MAX_PARTICLES - MIN_PARTICLES) / 100)
        .clamp(MIN_PARTICLES, MAX_PARTICLES);

    let base_size = MIN_PARTICLE_SIZE + fraction(extroversion) * (MAX_PARTICLE_SIZE - MIN_PARTICLE_SIZE);
    let roundness = 1.0 + fraction(agreeableness) * MAX_PARTICLE_ROUNDNESS_GAIN;

    ParticleSpec {
        count,
        size: base_size * roundness,
        color: PARTICLE_COLOR,
        opacity: MIN_PARTICLE_OPACITY
            + fraction(extroversion) * (MAX_PARTICLE_OPACITY - MIN_PARTICLE_OPACITY),
        extent: PARTICLE_EXTENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::GeometryKind;

    fn with_openness(openness: u8) -> PersonalityProfile {
        PersonalityProfile {
            openness,
            ..PersonalityProfile::uniform(50)
        }
    }

    fn kind_at(openness: u8) -> GeometryKind {
        map_profile(&with_openness(openness)).geometry.kind()
    }

    #[test]
    fn openness_thresholds_belong_to_the_higher_tier() {
        assert_eq!(kind_at(0), GeometryKind::Octahedron);
        assert_eq!(kind_at(19), GeometryKind::Octahedron);
        assert_eq!(kind_at(20), GeometryKind::Icosahedron);
        assert_eq!(kind_at(49), GeometryKind::Icosahedron);
        assert_eq!(kind_at(50), GeometryKind::TorusKnot);
        assert_eq!(kind_at(79), GeometryKind::TorusKnot);
        assert_eq!(kind_at(80), GeometryKind::TorusKnot);
        assert_eq!(kind_at(100), GeometryKind::TorusKnot);
    }

    #[test]
    fn complex_knot_starts_at_eighty() {
        match map_profile(&with_openness(80)).geometry {
            GeometrySpec::TorusKnot {
                p,
                q,
                radial_segments,
                tubular_segments,
                ..
            } => {
                assert_eq!((p, q), (3, 4));
                assert_eq!(radial_segments, 16);
                assert_eq!(tubular_segments, 128);
            }
            other => panic!("unexpected geometry {other:?}"),
        }
        match map_profile(&with_openness(79)).geometry {
            GeometrySpec::TorusKnot { p, q, .. } => assert_eq!((p, q), (2, 3)),
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    #[test]
    fn knot_segments_grow_within_a_tier() {
        let segments = |openness| match map_profile(&with_openness(openness)).geometry {
            GeometrySpec::TorusKnot {
                tubular_segments, ..
            } => tubular_segments,
            _ => 0,
        };
        assert_eq!(segments(50), 64);
        assert!(segments(65) > segments(50));
        assert!(segments(79) > segments(65));
        assert_eq!(segments(100), 192);
    }

    #[test]
    fn hue_runs_from_blue_through_neutral_to_red() {
        let hue = |n| {
            map_profile(&PersonalityProfile {
                neuroticism: n,
                ..PersonalityProfile::default()
            })
            .material
            .color
            .hue
        };
        assert!((hue(0) - 0.67).abs() < 1e-6);
        assert!((hue(50) - 0.5).abs() < 1e-6);
        assert!(hue(100).abs() < 1e-6);
        assert!(hue(25) < hue(0) && hue(25) > hue(50));
        assert!(hue(75) < hue(50) && hue(75) > hue(100));
    }

    #[test]
    fn saturation_and_lightness_are_fixed() {
        for n in [0, 37, 50, 88, 100] {
            let color = map_profile(&PersonalityProfile {
                neuroticism: n,
                ..PersonalityProfile::default()
            })
            .material
            .color;
            assert_eq!(color.saturation, 1.0);
            assert_eq!(color.lightness, 0.5);
        }
    }

    #[test]
    fn pulsation_is_off_at_zero_and_grows_with_neuroticism() {
        let amp = |n| {
            map_profile(&PersonalityProfile {
                neuroticism: n,
                ..PersonalityProfile::default()
            })
            .motion
            .pulsation_amplitude
        };
        assert_eq!(amp(0), 0.0);
        assert!(amp(40) > 0.0);
        assert!(amp(90) > amp(40));
    }

    #[test]
    fn shininess_rises_with_conscientiousness() {
        let finish = |c| {
            map_profile(&PersonalityProfile {
                conscientiousness: c,
                ..PersonalityProfile::default()
            })
            .material
        };
        assert_eq!(finish(0).shininess, 10.0);
        assert_eq!(finish(100).shininess, 100.0);
        assert!(finish(60).shininess > finish(30).shininess);
        assert!(finish(9).wireframe);
        assert!(!finish(10).wireframe);
    }

    #[test]
    fn pattern_density_follows_agreeableness() {
        let pattern = |a| {
            map_profile(&PersonalityProfile {
                agreeableness: a,
                ..PersonalityProfile::default()
            })
            .material
            .pattern
        };
        assert_eq!(pattern(0), None);
        assert_eq!(pattern(100).map(|p| p.repeat), Some(6.0));
        let low = pattern(20).map(|p| p.repeat).unwrap_or_default();
        let high = pattern(80).map(|p| p.repeat).unwrap_or_default();
        assert!(high > low);
    }

    #[test]
    fn particle_count_respects_floor_and_ceiling() {
        let particles = |e| {
            map_profile(&PersonalityProfile {
                extroversion: e,
                ..PersonalityProfile::default()
            })
            .particles
            .unwrap()
        };
        assert_eq!(particles(0).count, 50);
        assert_eq!(particles(100).count, 500);
        assert_eq!(particles(50).count, 275);
        assert!(particles(100).size > particles(0).size);
        assert!(particles(100).opacity > particles(0).opacity);
    }

    #[test]
    fn boundary_profiles_produce_valid_non_degenerate_specs() {
        for profile in [PersonalityProfile::uniform(0), PersonalityProfile::uniform(100)] {
            let spec = map_profile(&profile);
            assert_eq!(spec.validate(), Ok(()));

            let particles = spec.particles.as_ref().unwrap();
            assert!((MIN_PARTICLES..=MAX_PARTICLES).contains(&particles.count));
            assert!(particles.size > 0.0 && particles.size.is_finite());
        }
    }

    #[test]
    fn same_profile_maps_to_identical_spec() {
        let profile = PersonalityProfile {
            extroversion: 83,
            agreeableness: 83,
            conscientiousness: 83,
            neuroticism: 17,
            openness: 83,
        };
        let first = map_profile(&profile);
        let second = map_profile(&profile);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
