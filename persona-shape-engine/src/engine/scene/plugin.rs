use bevy::prelude::*;

use super::ledger::RenderResourceLedger;
use super::lifecycle::SceneLifecycle;
use super::surface::{SurfaceEvent, attach_render_surface, forward_window_resizes};
use crate::engine::camera::orbit_controls::orbit_controls_input;
use crate::engine::loading::pattern_texture::{PatternTextureLoader, poll_pattern_texture};
use crate::engine::systems::animation::{animate_scene, scene_animating};
use crate::engine::systems::scene_commands::{SceneCommand, SceneNotice, apply_scene_commands};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneLifecycle>()
            .init_resource::<RenderResourceLedger>()
            .init_resource::<PatternTextureLoader>()
            .add_event::<SceneCommand>()
            .add_event::<SurfaceEvent>()
            .add_event::<SceneNotice>();

        #[cfg(target_arch = "wasm32")]
        {
            use super::web_surface::{drain_surface_signals, register_surface_listeners};

            app.add_systems(
                Startup,
                (register_surface_listeners, attach_render_surface).chain(),
            )
            .add_systems(Update, drain_surface_signals.before(apply_scene_commands));
        }

        #[cfg(not(target_arch = "wasm32"))]
        app.add_systems(Startup, attach_render_surface);

        app.add_systems(
            Update,
            (
                forward_window_resizes,
                apply_scene_commands,
                poll_pattern_texture,
                (orbit_controls_input, animate_scene)
                    .chain()
                    .run_if(scene_animating),
            )
                .chain(),
        );
    }
}
