use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::render_settings::{
    CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, CONTROLS_AUTO_ROTATE_SPEED,
    CONTROLS_DAMPING_FACTOR, CONTROLS_MAX_POLAR_ANGLE, CONTROLS_ROTATE_SENSITIVITY,
    CONTROLS_ZOOM_STEP,
};
use std::f32::consts::TAU;

/// Radians per second of auto-rotation for each unit of speed.
const AUTO_ROTATE_RATE: f32 = TAU / 60.0;

/// Keeps the camera off the pole so `looking_at` stays well defined.
const MIN_POLAR_ANGLE: f32 = 1e-3;

/// Damping is specified per frame at this rate.
const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Damped orbit around a target point, in spherical coordinates.
///
/// The polar angle is measured from +Y and the azimuth from +Z towards +X.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub distance: f32,
    pub azimuth: f32,
    pub polar: f32,
    pub azimuth_velocity: f32,
    pub polar_velocity: f32,
    pub damping: f32,
    pub auto_rotate_speed: f32,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitControls {
    /// Controls whose current eye position is `eye`.
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(CAMERA_MIN_DISTANCE);
        let polar = (offset.y / distance).clamp(-1.0, 1.0).acos();

        Self {
            target,
            distance,
            azimuth: offset.x.atan2(offset.z),
            polar: polar.clamp(MIN_POLAR_ANGLE, CONTROLS_MAX_POLAR_ANGLE),
            azimuth_velocity: 0.0,
            polar_velocity: 0.0,
            damping: CONTROLS_DAMPING_FACTOR,
            auto_rotate_speed: CONTROLS_AUTO_ROTATE_SPEED,
            max_polar_angle: CONTROLS_MAX_POLAR_ANGLE,
            min_distance: CAMERA_MIN_DISTANCE,
            max_distance: CAMERA_MAX_DISTANCE,
        }
    }

    /// Step auto-rotation and the damped drag velocity by `delta_secs`.
    pub fn advance(&mut self, delta_secs: f32) {
        self.azimuth -= AUTO_ROTATE_RATE * self.auto_rotate_speed * delta_secs;
        self.azimuth += self.azimuth_velocity;
        self.polar =
            (self.polar + self.polar_velocity).clamp(MIN_POLAR_ANGLE, self.max_polar_angle);
        self.azimuth = self.azimuth.rem_euclid(TAU);

        let decay = (1.0 - self.damping).powf(delta_secs * REFERENCE_FRAME_RATE);
        self.azimuth_velocity *= decay;
        self.polar_velocity *= decay;
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + self.distance * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    pub fn apply(&self, transform: &mut Transform) {
        *transform = Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y);
    }

    /// Add angular velocity from a mouse drag in pixels.
    pub fn rotate(&mut self, drag: Vec2) {
        self.azimuth_velocity -= drag.x * CONTROLS_ROTATE_SENSITIVITY;
        self.polar_velocity -= drag.y * CONTROLS_ROTATE_SENSITIVITY;
    }

    /// Positive steps move the camera closer.
    pub fn zoom(&mut self, steps: f32) {
        self.distance =
            (self.distance - steps * CONTROLS_ZOOM_STEP).clamp(self.min_distance, self.max_distance);
    }
}

/// Left drag orbits, wheel zooms.
pub fn orbit_controls_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    mut controls: Query<&mut OrbitControls>,
) {
    let drag: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    let mut scroll = 0.0;
    for ev in scroll_events.read() {
        scroll += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    for mut orbit in &mut controls {
        if mouse_button.pressed(MouseButton::Left) && drag != Vec2::ZERO {
            orbit.rotate(drag);
        }
        if scroll.abs() > f32::EPSILON {
            orbit.zoom(scroll);
        }
    }
}
