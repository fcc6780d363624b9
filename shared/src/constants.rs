use std::f32::consts::FRAC_PI_2;

/// RGB color with 8-bit sRGB components.
pub type ColorRgb8 = [u8; 3];

/// Fixed physics timestep in seconds.
///
/// The client configures `Time<Fixed>` to the same rate so one fixed tick is one
/// integration step.
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Gravity in meters per second squared, applied along -Y.
pub const GRAVITY_MPS2: f32 = 9.81;

/// Coulomb friction used for every collider in the scene.
pub const CONTACT_FRICTION: f32 = 0.3;

/// Restitution used for every collider in the scene. Zero means no bounce.
pub const CONTACT_RESTITUTION: f32 = 0.0;

/// Contact prediction distance, in multiples of the length unit.
///
/// Must exceed the distance a body travels in one tick at landing speed (about 0.16 m for
/// the default drop), otherwise the box sinks into the ground for a tick before the
/// contact is seen.
pub const CONTACT_PREDICTION_DISTANCE: f32 = 0.5;

// Falling box.
pub const BOX_MASS: f32 = 1.0;
pub const BOX_START: [f32; 3] = [0.0, 5.0, 0.0];
pub const BOX_EXTENTS: [f32; 3] = [1.0, 1.0, 1.0];
pub const BOX_COLOR: ColorRgb8 = [173, 216, 230]; // lightblue

// Ground plane. The mesh is authored with a +Z normal and rotated onto the XZ plane.
pub const GROUND_ROTATION: [f32; 3] = [-FRAC_PI_2, 0.0, 0.0];
pub const GROUND_WIDTH: f32 = 100.0;
pub const GROUND_HEIGHT: f32 = 100.0;
pub const GROUND_COLOR: ColorRgb8 = [128, 128, 128]; // gray

// Canvas.
pub const BACKGROUND_COLOR: ColorRgb8 = [0, 0, 0];
pub const CAMERA_POSITION: [f32; 3] = [0.0, 5.0, 10.0];
pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Lights. Intensities are unitless scale factors; the renderer maps them to
// physical units.
pub const AMBIENT_INTENSITY: f32 = 0.4;
pub const SUN_POSITION: [f32; 3] = [10.0, 10.0, 10.0];
pub const SUN_INTENSITY: f32 = 1.0;

// Orbit controls.
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = f32::MAX;
