//! Browser side of the render surface: capability probe and context loss
//! listeners on the canvas.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use constants::render_settings::CANVAS_SELECTOR;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, window};

use super::surface::{SurfaceCapability, SurfaceEvent};

/// Signals raised by the browser between frames.
#[derive(Resource)]
pub struct SurfaceSignalQueue(Arc<Mutex<Vec<SurfaceEvent>>>);

/// Probe for WebGL2 and hook context loss/restore on the canvas.
pub fn register_surface_listeners(mut commands: Commands) {
    let capable = probe_webgl2();
    if !capable {
        warn!("WebGL2 is not available in this browser");
    }
    commands.insert_resource(SurfaceCapability(capable));

    let queue: Arc<Mutex<Vec<SurfaceEvent>>> = Arc::new(Mutex::new(Vec::new()));

    let Some(canvas) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(CANVAS_SELECTOR).ok().flatten())
    else {
        warn!("Canvas {} not found, context loss will go unnoticed", CANVAS_SELECTOR);
        commands.insert_resource(SurfaceSignalQueue(queue));
        return;
    };

    let lost_queue = queue.clone();
    let on_lost = Closure::wrap(Box::new(move |event: Event| {
        // Without this the browser never offers a restore.
        event.prevent_default();
        if let Ok(mut pending) = lost_queue.lock() {
            pending.push(SurfaceEvent::ContextLost);
        }
    }) as Box<dyn FnMut(Event)>);

    let restored_queue = queue.clone();
    let on_restored = Closure::wrap(Box::new(move |_event: Event| {
        if let Ok(mut pending) = restored_queue.lock() {
            pending.push(SurfaceEvent::ContextRestored);
        }
    }) as Box<dyn FnMut(Event)>);

    canvas
        .add_event_listener_with_callback("webglcontextlost", on_lost.as_ref().unchecked_ref())
        .expect("Failed to register webglcontextlost listener");
    canvas
        .add_event_listener_with_callback(
            "webglcontextrestored",
            on_restored.as_ref().unchecked_ref(),
        )
        .expect("Failed to register webglcontextrestored listener");

    on_lost.forget();
    on_restored.forget();
    commands.insert_resource(SurfaceSignalQueue(queue));
}

/// Scratch canvas so the probe never claims the real one.
fn probe_webgl2() -> bool {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.create_element("canvas").ok())
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .and_then(|canvas| canvas.get_context("webgl2").ok().flatten())
        .is_some()
}

pub fn drain_surface_signals(
    queue: Option<Res<SurfaceSignalQueue>>,
    mut surface_events: EventWriter<SurfaceEvent>,
) {
    let Some(queue) = queue else {
        return;
    };

    let signals = if let Ok(mut pending) = queue.0.lock() {
        std::mem::take(&mut *pending)
    } else {
        Vec::new()
    };

    for signal in signals {
        info!("Surface signal: {:?}", signal);
        surface_events.write(signal);
    }
}
