//! Asset loading for the survey manifest and the shape's pattern texture.

/// Survey manifest request and installation as a resource.
pub mod survey_loader;

/// Pattern image requests and their resolution onto the displayed shape.
pub mod pattern_texture;
