//! Viewer camera for the shape scene.
//!
//! A perspective camera bound to the visualization surface, driven by damped
//! orbit controls with auto-rotation and mouse drag/zoom input.

/// Orbit controls component, its per-frame advance and the input system.
pub mod orbit_controls;

/// Perspective camera spawn and projection updates for the bound surface.
pub mod scene_camera;
