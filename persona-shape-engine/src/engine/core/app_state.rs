use bevy::prelude::*;

use crate::engine::loading::survey_loader::SurveyLoader;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Survey manifest in flight; built-in texts are in use.
    #[default]
    Loading,
    Ready,
}

pub fn transition_to_ready(loader: Res<SurveyLoader>, mut next_state: ResMut<NextState<AppState>>) {
    if loader.is_resolved() {
        info!("Survey ready, transitioning to Ready state");
        next_state.set(AppState::Ready);
    }
}
