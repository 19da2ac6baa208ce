use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use super::lifecycle::SceneLifecycle;

/// Display surface able to host the scene. Lives on the window entity.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct RenderSurface {
    pub width: f32,
    pub height: f32,
    /// Whether a rendering context can be created here at all.
    pub capable: bool,
    pub context_lost: bool,
}

impl RenderSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            capable: true,
            context_lost: false,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio_of(self.width, self.height)
    }
}

/// Width over height; 1.0 for a collapsed surface.
pub fn aspect_ratio_of(width: f32, height: f32) -> f32 {
    if width > 0.0 && height > 0.0 {
        width / height
    } else {
        1.0
    }
}

/// Signals raised by the platform about the bound surface.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    ContextLost,
    ContextRestored,
    Resized { width: f32, height: f32 },
}

/// Result of probing the platform for a rendering context.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceCapability(pub bool);

/// Mark the primary window as the scene's surface and bind the lifecycle to it.
pub fn attach_render_surface(
    mut commands: Commands,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    capability: Option<Res<SurfaceCapability>>,
    mut lifecycle: ResMut<SceneLifecycle>,
) {
    let Ok((entity, window)) = windows.single() else {
        warn!("No primary window, scene has no surface to render into");
        return;
    };

    let mut surface = RenderSurface::new(window.width(), window.height());
    surface.capable = capability.is_none_or(|c| c.0);
    if !surface.capable {
        warn!("Rendering context probe failed, scene creation will be refused");
    }

    commands.entity(entity).insert(surface);
    lifecycle.bind_surface(entity);
    info!("Scene surface bound to window {entity}");
}

/// Forward resizes of the bound window as surface events.
pub fn forward_window_resizes(
    mut resized: EventReader<WindowResized>,
    lifecycle: Res<SceneLifecycle>,
    mut surface_events: EventWriter<SurfaceEvent>,
) {
    for event in resized.read() {
        if lifecycle.surface() == Some(event.window) {
            surface_events.write(SurfaceEvent::Resized {
                width: event.width,
                height: event.height,
            });
        }
    }
}
