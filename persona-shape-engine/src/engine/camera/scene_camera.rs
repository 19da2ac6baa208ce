use bevy::prelude::*;
use bevy::render::camera::RenderTarget;
use bevy::window::WindowRef;
use constants::render_settings::{CAMERA_DISTANCE, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR};

use super::orbit_controls::OrbitControls;

/// Spawn the viewer camera rendering into `surface`, with orbit controls attached.
pub fn spawn_scene_camera(world: &mut World, surface: Entity, aspect_ratio: f32) -> Entity {
    let eye = Vec3::new(0.0, 0.0, CAMERA_DISTANCE);
    let controls = OrbitControls::looking_from(eye, Vec3::ZERO);
    let mut transform = Transform::default();
    controls.apply(&mut transform);

    world
        .spawn((
            Camera3d::default(),
            Camera {
                target: RenderTarget::Window(WindowRef::Entity(surface)),
                clear_color: ClearColorConfig::Custom(Color::NONE),
                ..default()
            },
            Projection::Perspective(PerspectiveProjection {
                fov: CAMERA_FOV_DEGREES.to_radians(),
                aspect_ratio,
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
            }),
            transform,
            controls,
        ))
        .id()
}

/// Returns false when `camera` has no perspective projection.
pub fn set_camera_aspect(world: &mut World, camera: Entity, aspect_ratio: f32) -> bool {
    let Some(mut projection) = world.get_mut::<Projection>(camera) else {
        return false;
    };
    match &mut *projection {
        Projection::Perspective(perspective) => {
            perspective.aspect_ratio = aspect_ratio;
            true
        }
        _ => false,
    }
}
