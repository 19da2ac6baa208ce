//! JSON-RPC 2.0 bridge to the host page.
//!
//! On the web the engine runs inside an iframe. The host page renders the
//! questionnaire and the bar chart; it talks to the engine with
//! `postMessage`, and the engine answers the same way.
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Engine (iframe)
//!        │                                          │
//!        ├─ Request (with ID) ────────────────────> │
//!        │                                          ├─ Score / queue scene command
//!        │ <─────────────────── Response (with ID) ─┤
//!        │                                          │
//!        │ <──────────── Notification (no ID) ──────┤
//! ```
//!
//! ## Methods
//!
//! - `get_survey`: question texts and trait labels from the survey manifest
//! - `submit_answers {name, answers}`: score ten answers (`null` for
//!   unanswered), returns `{title, profile, breakdown}` and generates the shape
//! - `render_spec {spec}`: display an explicit shape spec after validation
//! - `reset`: tear the scene down (back to the questionnaire)
//! - `get_scene_state`: lifecycle snapshot and resource counters
//!
//! ## Notifications
//!
//! - `scene_state_changed {state}`
//! - `scene_error {message}`
//!
//! ## Error codes
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (incomplete answers carry `data.missing`)
//! - `-32603`: Internal error

/// Request handling, notifications and the wasm message listener.
pub mod web_rpc;
