//! Core application setup and state management.
//!
//! Builds the app for native and WASM targets, tracks the loading state and
//! reads the native command line.

/// Application setup and plugin configuration.
///
/// Wires the scene, survey loading and web RPC plugins onto a reactive
/// winit loop.
pub mod app_setup;

/// Loading -> Ready state machine.
pub mod app_state;

/// `--name` / `--answers` options of the native viewer.
pub mod launch_options;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
