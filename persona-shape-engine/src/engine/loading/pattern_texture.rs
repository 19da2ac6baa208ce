use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::scene::lifecycle::{SceneLifecycle, TextureLoadOutcome, resolve_pattern_texture};

/// The image load currently in flight for the displayed shape's pattern.
#[derive(Resource, Default)]
pub struct PatternTextureLoader {
    in_flight: Option<(u64, Handle<Image>)>,
}

impl PatternTextureLoader {
    /// Request id of the load being waited on.
    pub fn in_flight_request(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|(id, _)| *id)
    }
}

/// Request the pending pattern image and hand the result to the lifecycle
/// once the asset server has an answer. Never blocks; an image that never
/// arrives simply leaves the shape untextured.
///
/// A load whose request is no longer pending (scene disposed, shape rebuilt
/// without a pattern) is dropped together with its handle.
pub fn poll_pattern_texture(world: &mut World) {
    let pending = world
        .get_resource::<SceneLifecycle>()
        .and_then(|lifecycle| lifecycle.pending_texture().cloned());
    let Some(request) = pending else {
        if let Some(mut loader) = world.get_resource_mut::<PatternTextureLoader>() {
            if let Some((id, _)) = loader.in_flight.take() {
                debug!("Pattern texture request {id} no longer pending, dropping its load");
            }
        }
        return;
    };
    let Some(asset_server) = world.get_resource::<AssetServer>().cloned() else {
        return;
    };

    let outcome = {
        let mut loader = world.get_resource_or_insert_with(PatternTextureLoader::default);
        let image = match &loader.in_flight {
            Some((id, image)) if *id == request.id => image.clone(),
            _ => {
                debug!("Loading pattern texture '{}'", request.path);
                let image: Handle<Image> = asset_server.load(&request.path);
                loader.in_flight = Some((request.id, image.clone()));
                image
            }
        };

        load_outcome(asset_server.get_load_state(&image), image)
    };

    if let Some(outcome) = outcome {
        resolve_pattern_texture(world, request.id, outcome);
        world.resource_mut::<PatternTextureLoader>().in_flight = None;
    }
}

/// `None` while the asset server is still working on it.
fn load_outcome(state: Option<LoadState>, image: Handle<Image>) -> Option<TextureLoadOutcome> {
    match state {
        Some(LoadState::Loaded) => Some(TextureLoadOutcome::Loaded(image)),
        Some(LoadState::Failed(err)) => Some(TextureLoadOutcome::Failed(err.to_string())),
        _ => None,
    }
}
