use bevy::prelude::*;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, KEY_LIGHT_INTENSITY, KEY_LIGHT_POSITION, RIM_LIGHT_INTENSITY,
    RIM_LIGHT_POSITION,
};

/// Point light range, comfortably past the particle field.
const LIGHT_RANGE: f32 = 50.0;

/// Ambient fill, installed as the world's ambient light when a scene is created.
pub fn scene_ambient_light() -> AmbientLight {
    AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    }
}

/// Spawn the key and rim point lights.
pub fn spawn_scene_lights(world: &mut World) -> Vec<Entity> {
    [
        (KEY_LIGHT_POSITION, KEY_LIGHT_INTENSITY),
        (RIM_LIGHT_POSITION, RIM_LIGHT_INTENSITY),
    ]
    .into_iter()
    .map(|(position, intensity)| {
        world
            .spawn((
                PointLight {
                    intensity,
                    range: LIGHT_RANGE,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_translation(position),
            ))
            .id()
    })
    .collect()
}
