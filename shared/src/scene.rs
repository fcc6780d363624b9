//! Declarative description of the falling box scene.
//!
//! These are plain data types with no renderer or physics behavior attached. The client
//! turns a [`SceneDesc`] into Bevy entities, and [`crate::PhysicsWorld`] turns its
//! [`PhysicsDesc`] into Rapier bodies.
//!
//! Conventions
//! - Units are meters and radians unless a field name says otherwise.
//! - Rotations are XYZ Euler angles: the rotation matrix is `Rx * Ry * Rz`.
//! - Colors are 8-bit sRGB.

use rapier3d::na::{UnitQuaternion, Vector3};

use crate::{
    SceneError,
    constants::{
        AMBIENT_INTENSITY, BACKGROUND_COLOR, BOX_COLOR, BOX_EXTENTS, BOX_MASS, BOX_START,
        CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_POSITION, ColorRgb8, GRAVITY_MPS2,
        GROUND_COLOR, GROUND_HEIGHT, GROUND_ROTATION, GROUND_WIDTH, ORBIT_MAX_DISTANCE,
        ORBIT_MIN_DISTANCE, ORBIT_PAN_SPEED, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED, SUN_INTENSITY,
        SUN_POSITION,
    },
};

/// Root of the scene tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneDesc {
    pub canvas: CanvasDesc,
    pub lights: Vec<LightDesc>,
    pub controls: OrbitControlsDesc,
    pub physics: PhysicsDesc,
}

/// Render surface configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasDesc {
    /// Master switch for shadow mapping. Lights only cast shadows when this is set.
    pub shadows: bool,
    pub background: ColorRgb8,
    pub camera: CameraDesc,
}

/// Perspective camera placement.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraDesc {
    pub position: Vector3<f32>,
    /// Point the camera looks at, also the orbit focus.
    pub target: Vector3<f32>,
    /// Vertical field of view.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LightDesc {
    /// Uniform light with no position or shadows.
    Ambient { intensity: f32 },
    /// Parallel light shining from `position` toward the origin.
    Directional {
        position: Vector3<f32>,
        intensity: f32,
        cast_shadow: bool,
    },
}

/// Orbit camera tuning. Only the values are described here; the controller lives in the client.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitControlsDesc {
    pub enabled: bool,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

/// Physics container: world gravity plus the bodies it simulates.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsDesc {
    pub gravity: Vector3<f32>,
    pub bodies: Vec<BodyDesc>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BodyDesc {
    Dynamic(DynamicBodyDesc),
    Ground(StaticGroundDesc),
}

/// A gravity-affected box.
///
/// `position` is only the spawn position; afterwards the physics world owns the pose.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicBodyDesc {
    pub mass: f32,
    pub position: Vector3<f32>,
    pub geometry: BoxGeometry,
    pub material: MaterialDesc,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// An immovable, infinite collision plane with a finite visual mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticGroundDesc {
    /// XYZ Euler rotation applied to a plane whose local normal is +Z.
    pub rotation: Vector3<f32>,
    pub geometry: PlaneGeometry,
    pub material: MaterialDesc,
    pub receive_shadow: bool,
}

/// Axis-aligned box, full extents along X, Y and Z.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxGeometry {
    pub extents: Vector3<f32>,
}

impl BoxGeometry {
    pub fn half_extents(&self) -> Vector3<f32> {
        self.extents * 0.5
    }
}

/// Visual plane size. Collision for the ground is infinite regardless of this size.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
}

/// Standard (metallic/roughness) material.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialDesc {
    pub color: ColorRgb8,
    pub roughness: f32,
    pub metalness: f32,
}

impl MaterialDesc {
    /// Matte, non-metallic material of the given color.
    pub fn standard(color: ColorRgb8) -> Self {
        Self {
            color,
            roughness: 1.0,
            metalness: 0.0,
        }
    }
}

impl Default for SceneDesc {
    fn default() -> Self {
        Self {
            canvas: CanvasDesc::default(),
            lights: vec![
                LightDesc::Ambient {
                    intensity: AMBIENT_INTENSITY,
                },
                LightDesc::Directional {
                    position: SUN_POSITION.into(),
                    intensity: SUN_INTENSITY,
                    cast_shadow: true,
                },
            ],
            controls: OrbitControlsDesc::default(),
            physics: PhysicsDesc::default(),
        }
    }
}

impl Default for CanvasDesc {
    fn default() -> Self {
        Self {
            shadows: true,
            background: BACKGROUND_COLOR,
            camera: CameraDesc {
                position: CAMERA_POSITION.into(),
                target: Vector3::zeros(),
                fov_degrees: CAMERA_FOV_DEGREES,
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
            },
        }
    }
}

impl Default for OrbitControlsDesc {
    fn default() -> Self {
        Self {
            enabled: true,
            rotate_speed: ORBIT_ROTATE_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
        }
    }
}

impl Default for PhysicsDesc {
    fn default() -> Self {
        Self {
            gravity: Vector3::new(0.0, -GRAVITY_MPS2, 0.0),
            bodies: vec![
                BodyDesc::Dynamic(DynamicBodyDesc::default()),
                BodyDesc::Ground(StaticGroundDesc::default()),
            ],
        }
    }
}

impl Default for DynamicBodyDesc {
    fn default() -> Self {
        Self {
            mass: BOX_MASS,
            position: BOX_START.into(),
            geometry: BoxGeometry {
                extents: BOX_EXTENTS.into(),
            },
            material: MaterialDesc::standard(BOX_COLOR),
            cast_shadow: true,
            receive_shadow: true,
        }
    }
}

impl Default for StaticGroundDesc {
    fn default() -> Self {
        Self {
            rotation: GROUND_ROTATION.into(),
            geometry: PlaneGeometry {
                width: GROUND_WIDTH,
                height: GROUND_HEIGHT,
            },
            material: MaterialDesc::standard(GROUND_COLOR),
            receive_shadow: true,
        }
    }
}

impl SceneDesc {
    /// Reject descriptions that would hand NaNs or degenerate shapes to the engines.
    pub fn validate(&self) -> Result<(), SceneError> {
        let camera = &self.canvas.camera;
        ensure_finite("camera.position", &camera.position)?;
        ensure_finite("camera.target", &camera.target)?;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(SceneError::InvalidFieldOfView(camera.fov_degrees));
        }

        for light in &self.lights {
            if let LightDesc::Directional { position, .. } = light {
                ensure_finite("light.position", position)?;
            }
        }

        self.physics.validate()
    }
}

impl PhysicsDesc {
    pub fn validate(&self) -> Result<(), SceneError> {
        ensure_finite("physics.gravity", &self.gravity)?;
        self.bodies.iter().try_for_each(BodyDesc::validate)
    }
}

impl BodyDesc {
    pub fn validate(&self) -> Result<(), SceneError> {
        match self {
            BodyDesc::Dynamic(desc) => desc.validate(),
            BodyDesc::Ground(desc) => desc.validate(),
        }
    }
}

impl DynamicBodyDesc {
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SceneError::InvalidMass(self.mass));
        }
        ensure_finite("body.position", &self.position)?;
        for value in self.geometry.extents.iter().copied() {
            ensure_positive("body.geometry.extents", value)?;
        }
        Ok(())
    }
}

impl StaticGroundDesc {
    pub fn validate(&self) -> Result<(), SceneError> {
        ensure_finite("ground.rotation", &self.rotation)?;
        ensure_positive("ground.geometry.width", self.geometry.width)?;
        ensure_positive("ground.geometry.height", self.geometry.height)
    }

    /// The ground rotation as a quaternion.
    pub fn orientation(&self) -> UnitQuaternion<f32> {
        euler_xyz(&self.rotation)
    }
}

/// Build a quaternion from XYZ Euler angles (`Rx * Ry * Rz`).
///
/// nalgebra's `from_euler_angles` composes in the opposite order, so compose explicitly.
pub fn euler_xyz(angles: &Vector3<f32>) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x)
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z)
}

fn ensure_finite(field: &'static str, v: &Vector3<f32>) -> Result<(), SceneError> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(SceneError::NonFinite { field })
    }
}

fn ensure_positive(field: &'static str, value: f32) -> Result<(), SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::NonPositiveExtent { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn default_scene_has_one_ambient_and_one_shadowed_directional_light() {
        let scene = SceneDesc::default();

        let ambient = scene
            .lights
            .iter()
            .filter(|l| matches!(l, LightDesc::Ambient { .. }))
            .count();
        let directional: Vec<_> = scene
            .lights
            .iter()
            .filter_map(|l| match l {
                LightDesc::Directional { cast_shadow, .. } => Some(*cast_shadow),
                _ => None,
            })
            .collect();

        assert_eq!(ambient, 1);
        assert_eq!(directional, vec![true]);
        assert!(scene.canvas.shadows);
    }

    #[test]
    fn default_physics_holds_exactly_one_box_and_one_ground() {
        let physics = PhysicsDesc::default();
        assert_eq!(physics.bodies.len(), 2);

        let BodyDesc::Dynamic(body) = &physics.bodies[0] else {
            panic!("first body should be the falling box");
        };
        assert_eq!(body.mass, 1.0);
        assert_eq!(body.position, Vector3::new(0.0, 5.0, 0.0));
        assert_eq!(body.geometry.half_extents(), Vector3::new(0.5, 0.5, 0.5));

        let BodyDesc::Ground(ground) = &physics.bodies[1] else {
            panic!("second body should be the ground");
        };
        assert_eq!(ground.rotation, Vector3::new(-FRAC_PI_2, 0.0, 0.0));
        assert_eq!(ground.geometry.width, 100.0);
        assert_eq!(ground.geometry.height, 100.0);
        assert!(ground.receive_shadow);
    }

    #[test]
    fn default_scene_validates() {
        assert_eq!(SceneDesc::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_non_positive_mass() {
        let mut scene = SceneDesc::default();
        if let BodyDesc::Dynamic(body) = &mut scene.physics.bodies[0] {
            body.mass = 0.0;
        }
        assert_eq!(scene.validate(), Err(SceneError::InvalidMass(0.0)));
    }

    #[test]
    fn validate_rejects_nan_position() {
        let mut body = DynamicBodyDesc::default();
        body.position.y = f32::NAN;
        assert_eq!(
            body.validate(),
            Err(SceneError::NonFinite {
                field: "body.position"
            })
        );
    }

    #[test]
    fn validate_rejects_degenerate_ground() {
        let mut ground = StaticGroundDesc::default();
        ground.geometry.width = 0.0;
        assert!(matches!(
            ground.validate(),
            Err(SceneError::NonPositiveExtent { value, .. }) if value == 0.0
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_fov() {
        let mut scene = SceneDesc::default();
        scene.canvas.camera.fov_degrees = 180.0;
        assert_eq!(scene.validate(), Err(SceneError::InvalidFieldOfView(180.0)));
    }

    #[test]
    fn ground_rotation_maps_plane_normal_to_world_up() {
        let q = StaticGroundDesc::default().orientation();
        let n = q * Vector3::z();
        assert!((n - Vector3::y()).norm() < 1.0e-6, "normal was {n:?}");
    }

    #[test]
    fn euler_xyz_applies_x_first_in_matrix_order() {
        // Ry(90) turns +Z into +X first, then Rx(90) leaves +X alone.
        let q = euler_xyz(&Vector3::new(FRAC_PI_2, FRAC_PI_2, 0.0));
        let v = q * Vector3::z();
        assert!((v - Vector3::x()).norm() < 1.0e-6, "got {v:?}");
    }
}
