/// Base size of every generated shape.
pub const BASE_SIZE: f32 = 2.0;

/// Openness tier thresholds (percent). A score equal to a threshold belongs to the higher tier.
pub const OPENNESS_ICOSAHEDRON_THRESHOLD: u8 = 20;
pub const OPENNESS_KNOT_THRESHOLD: u8 = 50;
pub const OPENNESS_COMPLEX_KNOT_THRESHOLD: u8 = 80;

/// Simple knot tier.
pub const KNOT_TUBE: f32 = 0.4;
pub const KNOT_TUBULAR_SEGMENTS: u32 = 64;
pub const KNOT_RADIAL_SEGMENTS: u32 = 8;
pub const KNOT_P: u32 = 2;
pub const KNOT_Q: u32 = 3;

/// Complex knot tier.
pub const COMPLEX_KNOT_RADIUS_SCALE: f32 = 1.2;
pub const COMPLEX_KNOT_TUBE: f32 = 0.3;
pub const COMPLEX_KNOT_TUBULAR_SEGMENTS: u32 = 128;
pub const COMPLEX_KNOT_RADIAL_SEGMENTS: u32 = 16;
pub const COMPLEX_KNOT_P: u32 = 3;
pub const COMPLEX_KNOT_Q: u32 = 4;

/// Extra tubular segments gained across a knot tier, as a fraction of the tier base.
pub const KNOT_SEGMENT_GROWTH: f32 = 0.5;

/// Neuroticism hue endpoints (HSL hue in 0..1).
pub const CALM_HUE: f32 = 0.67;
pub const NEUTRAL_HUE: f32 = 0.5;
pub const VOLATILE_HUE: f32 = 0.0;
pub const SHAPE_SATURATION: f32 = 1.0;
pub const SHAPE_LIGHTNESS: f32 = 0.5;
pub const SHAPE_OPACITY: f32 = 0.9;

/// Pulsation driven by neuroticism.
pub const MAX_PULSATION_AMPLITUDE: f32 = 0.15;
pub const PULSATION_FREQUENCY: f32 = 2.0;

/// Conscientiousness finish.
pub const MIN_SHININESS: f32 = 10.0;
pub const MAX_SHININESS: f32 = 100.0;
pub const WIREFRAME_BELOW_CONSCIENTIOUSNESS: u8 = 10;

/// Agreeableness surface pattern.
pub const PATTERN_TEXTURE_PATH: &str = "textures/polka_dots.png";
pub const MAX_PATTERN_REPEAT_GAIN: f32 = 5.0;
pub const MAX_PARTICLE_ROUNDNESS_GAIN: f32 = 0.5;

/// Extroversion particle field.
pub const MIN_PARTICLES: u32 = 50;
pub const MAX_PARTICLES: u32 = 500;
pub const MIN_PARTICLE_SIZE: f32 = 0.03;
pub const MAX_PARTICLE_SIZE: f32 = 0.1;
pub const MIN_PARTICLE_OPACITY: f32 = 0.6;
pub const MAX_PARTICLE_OPACITY: f32 = 0.9;
pub const PARTICLE_COLOR: u32 = 0xF5A623;
/// Half-width of the cube particles are scattered in.
pub const PARTICLE_EXTENT: f32 = 4.0;

/// Rotation speeds in radians per second.
pub const SHAPE_ROTATION_SPEED: f32 = 0.3;
pub const PARTICLE_ROTATION_SPEED: f32 = 0.3;

/// Upper bound accepted for polyhedron subdivision.
pub const MAX_POLYHEDRON_DETAIL: u32 = 5;

/// Upper bounds accepted for externally supplied tessellation.
pub const MAX_TUBULAR_SEGMENTS: u32 = 512;
pub const MAX_RADIAL_SEGMENTS: u32 = 64;
pub const MAX_SPHERE_SEGMENTS: u32 = 256;
/// Ceiling for the torus knot's p and q windings.
pub const MAX_KNOT_WINDING: u32 = 16;
