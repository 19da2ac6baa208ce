use bevy::prelude::*;
use bevy::window::RequestRedraw;

use crate::engine::camera::orbit_controls::OrbitControls;
use crate::engine::scene::lifecycle::{LifecycleState, SceneLifecycle};

/// Identifies one running frame loop. Issued once per live scene handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Running flag (the token) and frame count for one scene handle.
#[derive(Debug, Default)]
pub struct AnimationState {
    token: Option<FrameToken>,
    frames: u64,
}

impl AnimationState {
    /// Returns the running token, issuing one only when stopped.
    pub fn ensure_running(&mut self, issue: impl FnOnce() -> FrameToken) -> FrameToken {
        *self.token.get_or_insert_with(issue)
    }

    pub fn cancel(&mut self) -> Option<FrameToken> {
        self.token.take()
    }

    pub fn is_running(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<FrameToken> {
        self.token
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn record_frame(&mut self) {
        self.frames += 1;
    }
}

/// Continuous rotation and optional pulsation of the displayed shape.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ShapeMotion {
    pub rotation_speed: f32,
    pub pulsation_amplitude: f32,
    pub pulsation_frequency: f32,
    pub base_scale: f32,
}

impl ShapeMotion {
    pub fn scale_at(&self, elapsed_secs: f32) -> f32 {
        if self.pulsation_amplitude > 0.0 {
            self.base_scale
                * (1.0 + self.pulsation_amplitude * (self.pulsation_frequency * elapsed_secs).sin())
        } else {
            self.base_scale
        }
    }
}

/// Marks the particle field and its spin rate.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ParticleField {
    pub rotation_speed: f32,
}

/// True while the scene is active and its frame loop holds a token.
pub fn scene_animating(lifecycle: Option<Res<SceneLifecycle>>) -> bool {
    lifecycle.is_some_and(|lifecycle| {
        lifecycle.state() == LifecycleState::Active
            && lifecycle
                .handle()
                .is_some_and(|handle| handle.animation().is_running())
    })
}

/// One frame of the scene: controls, particles, shape, then a redraw request.
///
/// The app runs in reactive winit mode, so the redraw request written here is
/// what schedules the next frame. Once the token is cancelled this system is
/// skipped by its run condition and no further frame is requested.
pub fn animate_scene(
    time: Res<Time>,
    mut lifecycle: ResMut<SceneLifecycle>,
    mut cameras: Query<
        (&mut OrbitControls, &mut Transform),
        (Without<ShapeMotion>, Without<ParticleField>),
    >,
    mut shapes: Query<
        (&ShapeMotion, &mut Transform),
        (Without<OrbitControls>, Without<ParticleField>),
    >,
    mut particles: Query<
        (&ParticleField, &mut Transform),
        (Without<OrbitControls>, Without<ShapeMotion>),
    >,
    mut redraw: EventWriter<RequestRedraw>,
) {
    let Some(handle) = lifecycle.handle_mut() else {
        return;
    };
    if !handle.animation().is_running() {
        return;
    }

    let delta = time.delta_secs();
    let elapsed = time.elapsed_secs();

    for (mut controls, mut transform) in &mut cameras {
        controls.advance(delta);
        controls.apply(&mut transform);
    }

    for (field, mut transform) in &mut particles {
        transform.rotate_y(field.rotation_speed * delta);
    }

    for (motion, mut transform) in &mut shapes {
        transform.rotate_y(motion.rotation_speed * delta);
        transform.rotate_x(motion.rotation_speed * 0.5 * delta);
        transform.scale = Vec3::splat(motion.scale_at(elapsed));
    }

    redraw.write(RequestRedraw);
    handle.animation_mut().record_frame();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_running_reuses_the_token() {
        let mut state = AnimationState::default();
        let mut issued = 0;
        let first = state.ensure_running(|| {
            issued += 1;
            FrameToken::new(1)
        });
        let second = state.ensure_running(|| {
            issued += 1;
            FrameToken::new(2)
        });

        assert_eq!(first, second);
        assert_eq!(issued, 1);
    }

    #[test]
    fn cancel_stops_the_loop() {
        let mut state = AnimationState::default();
        state.ensure_running(|| FrameToken::new(9));
        assert_eq!(state.cancel(), Some(FrameToken::new(9)));
        assert!(!state.is_running());
        assert_eq!(state.cancel(), None);
    }

    #[test]
    fn pulsation_oscillates_around_the_base_scale() {
        let motion = ShapeMotion {
            rotation_speed: 0.3,
            pulsation_amplitude: 0.1,
            pulsation_frequency: 2.0,
            base_scale: 1.0,
        };
        let peak = motion.scale_at(std::f32::consts::FRAC_PI_4);
        assert!((peak - 1.1).abs() < 1e-5);
        assert_eq!(motion.scale_at(0.0), 1.0);
    }

    #[test]
    fn zero_amplitude_keeps_the_base_scale() {
        let motion = ShapeMotion {
            rotation_speed: 0.3,
            pulsation_amplitude: 0.0,
            pulsation_frequency: 2.0,
            base_scale: 1.5,
        };
        assert_eq!(motion.scale_at(1.234), 1.5);
    }
}
