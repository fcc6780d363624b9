use bevy::prelude::*;
use boxfall_shared::{BodyHandle, PhysicsWorld, Pose, na};

use crate::scene::SceneState;

pub(super) fn plugin(app: &mut App) {
    let world = PhysicsWorld::default();
    // One fixed tick is one integration step.
    app.insert_resource(Time::<Fixed>::from_seconds(world.timestep() as f64));
    app.insert_resource(Physics(world));

    app.add_systems(
        FixedUpdate,
        step_physics.run_if(in_state(SceneState::Mounted)),
    );
    // Fixed ticks run before `Update`, so each frame reads the poses of the latest step.
    app.add_systems(
        Update,
        sync_dynamic_transforms.run_if(in_state(SceneState::Mounted)),
    );
}

/// The Rapier world shared by every body in the scene.
#[derive(Resource, Deref, DerefMut)]
pub struct Physics(pub PhysicsWorld);

/// Links a visual mesh to its physics body. Set once at spawn.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLink(pub BodyHandle);

/// Mesh whose transform is driven by the simulation every frame.
#[derive(Component, Debug)]
pub struct DynamicBody;

/// Mesh of an immovable collider. Never synced after spawn.
#[derive(Component, Debug)]
pub struct StaticBody;

fn step_physics(mut physics: ResMut<Physics>) {
    physics.step();
}

fn sync_dynamic_transforms(
    physics: Res<Physics>,
    mut bodies: Query<(&BodyLink, &mut Transform), With<DynamicBody>>,
) {
    for (link, mut transform) in &mut bodies {
        let Some(pose) = physics.pose(link.0) else {
            warn!("no physics body for {:?}", link.0);
            continue;
        };
        apply_pose(&pose, &mut transform);
    }
}

/// Copy a physics pose into a Bevy transform, leaving scale untouched.
pub fn apply_pose(pose: &Pose, transform: &mut Transform) {
    transform.translation = to_vec3(&pose.translation);
    transform.rotation = to_quat(&pose.rotation);
}

pub fn to_vec3(v: &na::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_quat(q: &na::UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn quaternion_conversion_preserves_rotation() {
        let q = boxfall_shared::euler_xyz(&na::Vector3::new(-FRAC_PI_2, 0.0, 0.0));
        let bevy_q = to_quat(&q);

        let expected = Quat::from_euler(EulerRot::XYZ, -FRAC_PI_2, 0.0, 0.0);
        assert!(bevy_q.angle_between(expected) < 1.0e-5);
        assert!((bevy_q * Vec3::Z).distance(Vec3::Y) < 1.0e-5);
    }

    #[test]
    fn fixed_timestep_matches_integration_step() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(plugin);

        let world = app.world();
        let dt = world.resource::<Physics>().timestep();
        assert_eq!(
            world.resource::<Time<Fixed>>().timestep(),
            std::time::Duration::from_secs_f64(dt as f64)
        );
    }

    #[test]
    fn apply_pose_keeps_scale() {
        let pose = Pose {
            translation: na::Vector3::new(1.0, 2.0, 3.0),
            rotation: na::UnitQuaternion::identity(),
        };
        let mut transform = Transform::from_scale(Vec3::splat(2.0));

        apply_pose(&pose, &mut transform);

        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert_eq!(transform.scale, Vec3::splat(2.0));
    }
}
