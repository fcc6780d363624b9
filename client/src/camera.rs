use crate::{input::CameraAction, physics::to_vec3, scene::SceneState};
use bevy::{prelude::*, window::PrimaryWindow};
use boxfall_shared::{CameraDesc, OrbitControlsDesc};
use leafwing_input_manager::prelude::*;
use std::f32::consts::{FRAC_PI_2, TAU};

pub(super) fn plugin(app: &mut App) {
    // Input actions are refreshed in `PreUpdate`.
    app.add_systems(
        Update,
        orbit_controls.run_if(in_state(SceneState::Mounted)),
    );
}

/// Keeps the camera slightly off the poles so `looking_at` never sees a degenerate up vector.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Per scroll line, distance is multiplied by this factor raised to the zoom speed.
const ZOOM_STEP: f32 = 0.95;

/// Orbit state for a camera looking at `focus` from a sphere of `radius`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub radius: f32,
    /// Rotation about +Y, zero looking down -Z.
    pub yaw: f32,
    /// Elevation above the XZ plane.
    pub pitch: f32,
    pub enabled: bool,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    pub fn new(camera: &CameraDesc, controls: &OrbitControlsDesc) -> Self {
        let focus = to_vec3(&camera.target);
        let offset = to_vec3(&camera.position) - focus;
        let radius = offset.length().max(f32::EPSILON);

        Self {
            focus,
            radius: radius.clamp(controls.min_distance, controls.max_distance),
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
            enabled: controls.enabled,
            rotate_speed: controls.rotate_speed,
            pan_speed: controls.pan_speed,
            zoom_speed: controls.zoom_speed,
            min_distance: controls.min_distance,
            max_distance: controls.max_distance,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.focus + self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
    }

    /// Rotate by a pointer drag of `delta` pixels on a viewport `viewport_height` pixels tall.
    /// A drag across the full height turns the camera once around.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let scale = TAU / viewport_height.max(1.0) * self.rotate_speed;
        self.yaw -= delta.x * scale;
        self.pitch = (self.pitch + delta.y * scale).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move the focus so the point under the pointer follows the drag.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32, fov: f32, rotation: Quat) {
        let world_per_pixel = 2.0 * self.radius * (fov * 0.5).tan() / viewport_height.max(1.0);
        let scale = world_per_pixel * self.pan_speed;
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        self.focus += (-delta.x * right + delta.y * up) * scale;
    }

    /// Positive `scroll` moves toward the focus.
    pub fn zoom(&mut self, scroll: f32) {
        let factor = ZOOM_STEP.powf(scroll * self.zoom_speed);
        self.radius = (self.radius * factor).clamp(self.min_distance, self.max_distance);
    }
}

/// Spawn bundle for the scene camera.
pub fn camera_bundle(camera: &CameraDesc, controls: &OrbitControlsDesc) -> impl Bundle + use<> {
    let orbit = OrbitCamera::new(camera, controls);
    let transform = orbit.transform();

    (
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        transform,
        orbit,
    )
}

fn orbit_controls(
    actions: Res<ActionState<CameraAction>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform, &Projection)>,
) {
    let Ok((mut orbit, mut transform, projection)) = cameras.single_mut() else {
        return;
    };
    if !orbit.enabled {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };

    let height = window.height();
    let look = actions.axis_pair(&CameraAction::Look);
    let scroll = actions.value(&CameraAction::Zoom);

    if look == Vec2::ZERO && scroll == 0.0 {
        return;
    }

    if actions.pressed(&CameraAction::Rotate) {
        orbit.rotate(look, height);
    } else if actions.pressed(&CameraAction::Pan) {
        let fov = match projection {
            Projection::Perspective(p) => p.fov,
            _ => FRAC_PI_2,
        };
        orbit.pan(look, height, fov, transform.rotation);
    }

    if scroll != 0.0 {
        orbit.zoom(scroll);
    }

    *transform = orbit.transform();
}
