use bevy::{
    light::{NotShadowCaster, NotShadowReceiver},
    prelude::*,
};
use boxfall_shared::{
    BodyDesc, BodyHandle, DynamicBodyDesc, MaterialDesc, PhysicsWorld, StaticGroundDesc,
};

use super::SceneMember;
use crate::physics::{BodyLink, DynamicBody, StaticBody, apply_pose};

/// Spawn the visual mesh for a body that is already registered under `handle`.
///
/// The mesh starts at the body's current physics pose, so mesh and body agree from the
/// first frame.
pub(super) fn spawn_body(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    physics: &PhysicsWorld,
    desc: &BodyDesc,
    handle: BodyHandle,
) -> Entity {
    let mut transform = Transform::default();
    if let Some(pose) = physics.pose(handle) {
        apply_pose(&pose, &mut transform);
    }

    match desc {
        BodyDesc::Dynamic(desc) => {
            spawn_dynamic_body(commands, meshes, materials, desc, handle, transform)
        }
        BodyDesc::Ground(desc) => {
            spawn_static_ground(commands, meshes, materials, desc, handle, transform)
        }
    }
}

fn spawn_dynamic_body(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    desc: &DynamicBodyDesc,
    handle: BodyHandle,
    transform: Transform,
) -> Entity {
    let extents = desc.geometry.extents;

    let mut entity = commands.spawn((
        Name::new("Dynamic Box"),
        SceneMember,
        DynamicBody,
        BodyLink(handle),
        Mesh3d(meshes.add(Cuboid::new(extents.x, extents.y, extents.z))),
        MeshMaterial3d(materials.add(standard_material(&desc.material))),
        transform,
    ));
    if !desc.cast_shadow {
        entity.insert(NotShadowCaster);
    }
    if !desc.receive_shadow {
        entity.insert(NotShadowReceiver);
    }
    entity.id()
}

fn spawn_static_ground(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    desc: &StaticGroundDesc,
    handle: BodyHandle,
    transform: Transform,
) -> Entity {
    let size = Vec2::new(desc.geometry.width, desc.geometry.height);

    // Authored facing +Z like the collider; the body rotation lays it flat.
    let mut entity = commands.spawn((
        Name::new("Ground"),
        SceneMember,
        StaticBody,
        BodyLink(handle),
        Mesh3d(meshes.add(Plane3d::new(Vec3::Z, size * 0.5).mesh().build())),
        MeshMaterial3d(materials.add(standard_material(&desc.material))),
        transform,
        NotShadowCaster,
    ));
    if !desc.receive_shadow {
        entity.insert(NotShadowReceiver);
    }
    entity.id()
}

fn standard_material(desc: &MaterialDesc) -> StandardMaterial {
    let [r, g, b] = desc.color;
    StandardMaterial {
        base_color: Color::srgb_u8(r, g, b),
        perceptual_roughness: desc.roughness,
        metallic: desc.metalness,
        ..default()
    }
}
