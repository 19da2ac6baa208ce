//! Scene lifecycle: everything displayed for one shape, and the state
//! machine that creates, rebuilds and tears it down.

/// `SceneLifecycle` resource with create/rebuild/dispose and context loss handling.
pub mod lifecycle;

/// Handles to the camera, lights, shape and particle field of a live scene.
pub mod handle;

/// Counters proving every created resource is released exactly once.
pub mod ledger;

pub mod lighting;
pub mod materials;

/// The window the scene renders into, and the platform signals about it.
pub mod surface;

/// Registers the scene resources, events and systems.
pub mod plugin;

/// Browser capability probe and WebGL context listeners.
#[cfg(target_arch = "wasm32")]
pub mod web_surface;
