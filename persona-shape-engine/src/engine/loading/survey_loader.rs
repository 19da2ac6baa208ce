use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::survey::SURVEY_MANIFEST_PATH;

use crate::engine::assets::survey_manifest::SurveyManifest;

/// Handle of the survey manifest request and whether it has been resolved.
#[derive(Resource, Default)]
pub struct SurveyLoader {
    handle: Option<Handle<SurveyManifest>>,
    resolved: bool,
}

impl SurveyLoader {
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

pub fn start_loading(mut loader: ResMut<SurveyLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(SURVEY_MANIFEST_PATH));
}

/// Install the loaded manifest as a resource. A failed load keeps the
/// built-in defaults.
pub fn apply_survey_manifest(
    mut loader: ResMut<SurveyLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<SurveyManifest>>,
) {
    if loader.resolved {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let Some(manifest) = manifests.get(&handle) {
        info!(
            "Survey manifest loaded: {} questions, {} trait labels",
            manifest.questions.len(),
            manifest.trait_labels.len()
        );
        commands.insert_resource(manifest.clone());
        loader.resolved = true;
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&handle) {
        warn!("Survey manifest failed to load ({err}), using built-in questions");
        loader.resolved = true;
    }
}
