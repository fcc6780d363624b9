//! Rapier world that simulates the scene's bodies.
//!
//! Design goals
//! - One owner: every piece of Rapier state lives in [`PhysicsWorld`]; nothing is global.
//! - Opaque identity: callers hold a [`BodyHandle`] per body and never see Rapier handles.
//! - The simulation is the only writer of dynamic body poses. There is no API to teleport
//!   a body after it has been registered.

use rapier3d::na::UnitQuaternion;
use rapier3d::prelude::*;

use crate::{
    SceneError,
    constants::{CONTACT_PREDICTION_DISTANCE, PHYSICS_DT},
    rapier::{ColliderShapeDef, collider_from_def},
    scene::{BodyDesc, DynamicBodyDesc, StaticGroundDesc},
};

/// Identity token linking a visual mesh to its physics body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(RigidBodyHandle);

/// How a registered body participates in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    Fixed,
}

/// World-space pose of a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub translation: Vector<f32>,
    pub rotation: UnitQuaternion<f32>,
}

pub struct PhysicsWorld {
    gravity: Vector<f32>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(Vector::zeros())
    }
}

impl PhysicsWorld {
    /// Empty world stepping at [`PHYSICS_DT`].
    pub fn new(gravity: Vector<f32>) -> Self {
        Self {
            gravity,
            integration_parameters: IntegrationParameters {
                dt: PHYSICS_DT,
                normalized_prediction_distance: CONTACT_PREDICTION_DISTANCE,
                ..IntegrationParameters::default()
            },
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Seconds simulated by one [`PhysicsWorld::step`].
    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    pub fn gravity(&self) -> Vector<f32> {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vector<f32>) {
        self.gravity = gravity;
    }

    /// Number of rigid bodies currently registered.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn add(&mut self, desc: &BodyDesc) -> Result<BodyHandle, SceneError> {
        match desc {
            BodyDesc::Dynamic(desc) => self.add_dynamic(desc),
            BodyDesc::Ground(desc) => self.add_ground(desc),
        }
    }

    /// Register a gravity-affected box at its spawn position.
    pub fn add_dynamic(&mut self, desc: &DynamicBodyDesc) -> Result<BodyHandle, SceneError> {
        desc.validate()?;

        let rb = RigidBodyBuilder::dynamic()
            .translation(desc.position)
            .build();
        let rb_handle = self.bodies.insert(rb);

        let collider = collider_from_def(&ColliderShapeDef::Cuboid {
            half_extents: desc.geometry.half_extents(),
        })
        .mass(desc.mass)
        .build();
        self.colliders
            .insert_with_parent(collider, rb_handle, &mut self.bodies);

        // Make `mass()` reflect the collider right away instead of after the first step.
        if let Some(rb) = self.bodies.get_mut(rb_handle) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }

        log::debug!(
            "registered dynamic body {:?} (mass {}, position {:?})",
            rb_handle,
            desc.mass,
            desc.position
        );
        Ok(BodyHandle(rb_handle))
    }

    /// Register an immovable half-space oriented by the ground rotation.
    pub fn add_ground(&mut self, desc: &StaticGroundDesc) -> Result<BodyHandle, SceneError> {
        desc.validate()?;

        let rotation = desc.orientation();
        let rb = RigidBodyBuilder::fixed()
            .rotation(rotation.scaled_axis())
            .build();
        let rb_handle = self.bodies.insert(rb);

        let collider = collider_from_def(&ColliderShapeDef::Plane).build();
        self.colliders
            .insert_with_parent(collider, rb_handle, &mut self.bodies);

        log::debug!(
            "registered static ground {:?} (rotation {:?})",
            rb_handle,
            desc.rotation
        );
        Ok(BodyHandle(rb_handle))
    }

    /// Remove a body together with its colliders.
    pub fn remove(&mut self, handle: BodyHandle) -> Result<(), SceneError> {
        self.bodies
            .remove(
                handle.0,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .map(|_| ())
            .ok_or(SceneError::UnknownBody(handle))
    }

    /// Advance the simulation by one fixed timestep.
    pub fn step(&mut self) {
        // No hooks or events are needed by the scene.
        let hooks = ();
        let events = ();

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &hooks,
            &events,
        );
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle.0)
    }

    pub fn pose(&self, handle: BodyHandle) -> Option<Pose> {
        self.bodies.get(handle.0).map(|rb| Pose {
            translation: *rb.translation(),
            rotation: *rb.rotation(),
        })
    }

    pub fn mass(&self, handle: BodyHandle) -> Option<f32> {
        self.bodies.get(handle.0).map(|rb| rb.mass())
    }

    pub fn kind(&self, handle: BodyHandle) -> Option<BodyKind> {
        self.bodies.get(handle.0).map(|rb| {
            if rb.is_dynamic() {
                BodyKind::Dynamic
            } else {
                BodyKind::Fixed
            }
        })
    }

    /// World rotation of the first collider attached to `handle`.
    pub fn collider_rotation(&self, handle: BodyHandle) -> Option<UnitQuaternion<f32>> {
        let rb = self.bodies.get(handle.0)?;
        let co_handle = rb.colliders().first()?;
        self.colliders.get(*co_handle).map(|co| *co.rotation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::GRAVITY_MPS2, scene::euler_xyz};
    use std::f32::consts::FRAC_PI_2;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vector::new(0.0, -GRAVITY_MPS2, 0.0))
    }

    #[test]
    fn dynamic_body_registers_with_spawn_position_and_mass() {
        let mut world = world();
        let h = world
            .add_dynamic(&DynamicBodyDesc::default())
            .expect("default box is valid");

        let pose = world.pose(h).unwrap();
        assert_eq!(pose.translation, Vector::new(0.0, 5.0, 0.0));
        assert!((world.mass(h).unwrap() - 1.0).abs() < 1.0e-6);
        assert_eq!(world.kind(h), Some(BodyKind::Dynamic));
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn ground_collider_keeps_the_given_rotation() {
        let mut world = world();
        let h = world.add_ground(&StaticGroundDesc::default()).unwrap();

        let expected = euler_xyz(&Vector::new(-FRAC_PI_2, 0.0, 0.0));
        let body_rot = world.pose(h).unwrap().rotation;
        let collider_rot = world.collider_rotation(h).unwrap();

        assert!(body_rot.angle_to(&expected) < 1.0e-5);
        assert!(collider_rot.angle_to(&expected) < 1.0e-5);
        assert_eq!(world.kind(h), Some(BodyKind::Fixed));

        // The effect of the rotation is preserved: plane normal points up.
        let n = collider_rot * Vector::z();
        assert!((n - Vector::y()).norm() < 1.0e-5);
    }

    #[test]
    fn one_step_covers_one_fixed_tick() {
        assert_eq!(world().timestep(), PHYSICS_DT);
    }

    #[test]
    fn add_rejects_invalid_mass_without_registering() {
        let mut world = world();
        let desc = DynamicBodyDesc {
            mass: -1.0,
            ..DynamicBodyDesc::default()
        };

        assert_eq!(
            world.add_dynamic(&desc),
            Err(SceneError::InvalidMass(-1.0))
        );
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn remove_unknown_handle_is_an_error() {
        let mut world = world();
        let h = world.add_ground(&StaticGroundDesc::default()).unwrap();
        world.remove(h).unwrap();

        assert_eq!(world.remove(h), Err(SceneError::UnknownBody(h)));
        assert!(!world.contains(h));
        assert_eq!(world.pose(h), None);
    }

    #[test]
    fn box_falls_under_gravity_and_rests_on_ground() {
        let mut world = world();
        let body = world.add_dynamic(&DynamicBodyDesc::default()).unwrap();
        world.add_ground(&StaticGroundDesc::default()).unwrap();

        let mut prev_y = world.pose(body).unwrap().translation.y;

        // Free fall from y=5 to contact at y=0.5 takes ~58 ticks at 60 Hz.
        for tick in 0..50 {
            world.step();
            let y = world.pose(body).unwrap().translation.y;
            assert!(y < prev_y, "tick {tick}: y {y} did not drop below {prev_y}");
            prev_y = y;
        }

        // Keeps falling until the first contact stops it, and never sinks into the plane.
        let mut landed = false;
        for tick in 50..300 {
            world.step();
            let y = world.pose(body).unwrap().translation.y;
            assert!(y >= 0.495, "tick {tick}: box sank into the ground, y = {y}");
            if !landed {
                if y > prev_y {
                    landed = true;
                } else {
                    prev_y = y;
                }
            }
        }
        assert!(landed || (prev_y - 0.5).abs() < 0.005);

        let rest = world.pose(body).unwrap().translation;
        assert!((rest.y - 0.5).abs() < 0.02, "box rests at y = {}", rest.y);
        assert!(rest.x.abs() < 1.0e-3 && rest.z.abs() < 1.0e-3);
    }

    #[test]
    fn ground_never_moves() {
        let mut world = world();
        world.add_dynamic(&DynamicBodyDesc::default()).unwrap();
        let ground = world.add_ground(&StaticGroundDesc::default()).unwrap();
        let before = world.pose(ground).unwrap();

        for _ in 0..120 {
            world.step();
        }

        assert_eq!(world.pose(ground).unwrap(), before);
    }
}
