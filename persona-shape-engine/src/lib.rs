//! Personality questionnaire to animated 3D shape.
//!
//! `personality` scores ten TIPI-J answers into five trait percentages,
//! `shape` maps a profile to a declarative shape spec, and `engine` displays
//! that spec in a Bevy scene with a strict create/rebuild/dispose lifecycle.
//! `rpc` exposes the whole flow to a host page on the web build.

pub mod engine;
pub mod personality;
pub mod rpc;
pub mod shape;
