//! Declarative shape descriptions and the profile-to-shape mapping.
//!
//! Each trait drives one visual channel so the traits stay separable in the
//! render: openness picks the geometry, agreeableness the surface pattern,
//! conscientiousness the finish, neuroticism the hue and pulse, extroversion
//! the particle field.

/// Pure mapping from a personality profile to a shape spec.
pub mod mapper;

/// Shape, material, particle and motion descriptions with validation.
pub mod spec;

pub use mapper::map_profile;
pub use spec::{
    GeometryKind, GeometrySpec, HslColor, MaterialSpec, MotionSpec, ParticleSpec, PatternSpec,
    ShapeSpec, ShapeSpecError,
};
