use bevy::math::Vec3;

/// Vertical field of view of the viewer camera, in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Initial camera distance from the shape along +Z.
pub const CAMERA_DISTANCE: f32 = 6.0;
pub const CAMERA_MIN_DISTANCE: f32 = 2.5;
pub const CAMERA_MAX_DISTANCE: f32 = 20.0;

/// Ambient fill brightness (cd/m^2).
pub const AMBIENT_BRIGHTNESS: f32 = 800.0;

/// Key light: strong, upper right front.
pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const KEY_LIGHT_INTENSITY: f32 = 1_500_000.0;

/// Rim light: weak, lower left back.
pub const RIM_LIGHT_POSITION: Vec3 = Vec3::new(-5.0, -5.0, -5.0);
pub const RIM_LIGHT_INTENSITY: f32 = 500_000.0;

/// Fraction of angular velocity removed per frame by the orbit controls.
pub const CONTROLS_DAMPING_FACTOR: f32 = 0.05;

/// Auto-rotation speed; 2.0 is one full orbit every 30 seconds.
pub const CONTROLS_AUTO_ROTATE_SPEED: f32 = 2.0;

/// Radians of orbit per pixel of mouse drag.
pub const CONTROLS_ROTATE_SENSITIVITY: f32 = 0.005;

/// Distance change per wheel line.
pub const CONTROLS_ZOOM_STEP: f32 = 0.5;

/// Upper bound on the polar angle (measured from +Y), keeps the camera above the equator.
pub const CONTROLS_MAX_POLAR_ANGLE: f32 = std::f32::consts::FRAC_PI_2;

/// Canvas selector used by the web build.
pub const CANVAS_SELECTOR: &str = "#persona-canvas";
