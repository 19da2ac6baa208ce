use std::time::Duration;

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::survey_manifest::SurveyManifest;
use crate::engine::core::app_state::{AppState, transition_to_ready};
use crate::engine::core::launch_options::submit_launch_answers;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::survey_loader::{SurveyLoader, apply_survey_manifest, start_loading};
use crate::engine::scene::plugin::ScenePlugin;
use crate::engine::systems::overlay::ProfileResult;
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers SurveyManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SurveyManifest>::new(&["json"]))
        .add_plugins(ScenePlugin)
        .add_plugins(WebRpcPlugin)
        // Frames are driven by the animation's redraw requests; input and RPC
        // traffic still get a tick at least every 100 ms.
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::reactive(Duration::from_millis(100)),
            unfocused_mode: UpdateMode::reactive_low_power(Duration::from_millis(500)),
        });

    // Line polygon mode is not available on WebGL2; wireframe shapes fall
    // back to double-sided fills there.
    #[cfg(not(target_arch = "wasm32"))]
    {
        use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};

        app.add_plugins(WireframePlugin::default())
            .insert_resource(WireframeConfig {
                global: false,
                default_color: Color::WHITE,
            });
    }

    // Built-in texts stand in until the manifest arrives.
    app.init_resource::<SurveyManifest>()
        .init_resource::<SurveyLoader>()
        .init_resource::<ProfileResult>();

    app.add_systems(Startup, start_loading)
        .add_systems(
            Update,
            (apply_survey_manifest, transition_to_ready)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Ready), submit_launch_answers);

    #[cfg(not(target_arch = "wasm32"))]
    {
        use crate::engine::systems::overlay::{create_result_overlay, update_result_overlay};

        app.add_systems(Startup, create_result_overlay).add_systems(
            Update,
            update_result_overlay.run_if(resource_changed::<ProfileResult>),
        );
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
