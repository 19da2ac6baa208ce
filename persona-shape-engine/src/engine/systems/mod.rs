//! Per-frame systems of the viewer.
//!
//! Scene command application, the self-rescheduling animation loop and the
//! native result overlay.

/// Frame token, shape/particle motion components and the animation system.
///
/// A frame is only requested while the scene holds a live token.
pub mod animation;

/// Scene commands from the host page or command line, applied to the lifecycle.
pub mod scene_commands;

/// Result title and percentage breakdown text for native builds.
pub mod overlay;
