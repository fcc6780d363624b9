//! Scene root: mounts the described scene on entering [`SceneState::Mounted`] and tears
//! it down on exit.
//!
//! Mounting spawns the camera (with orbit controls and the ambient light), the
//! directional light and one mesh per physics body, and registers the bodies with the
//! [`Physics`] world. Everything spawned carries [`SceneMember`] so unmounting can find it.

mod bodies;
mod lighting;

use bevy::prelude::*;
use boxfall_shared::{MountedBodies, SceneDesc};

use crate::{camera::camera_bundle, physics::Physics};

pub(super) fn plugin(app: &mut App) {
    app.init_state::<SceneState>();
    app.init_resource::<SceneDescription>();
    app.init_resource::<MountedScene>();

    app.add_systems(Startup, request_mount);
    app.add_systems(OnEnter(SceneState::Mounted), mount_scene);
    app.add_systems(OnExit(SceneState::Mounted), unmount_scene);
}

#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneState {
    #[default]
    Unmounted,
    Mounted,
}

/// The scene to mount. Insert a different one before startup to change it.
#[derive(Resource, Default, Debug, Deref)]
pub struct SceneDescription(pub SceneDesc);

/// Marks every entity owned by the mounted scene.
#[derive(Component, Debug)]
pub struct SceneMember;

/// Bodies registered by the current mount, handed back to the physics world on unmount.
#[derive(Resource, Default)]
struct MountedScene(Option<MountedBodies>);

fn request_mount(mut next: ResMut<NextState<SceneState>>) {
    next.set(SceneState::Mounted);
}

fn mount_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut physics: ResMut<Physics>,
    mut mounted: ResMut<MountedScene>,
    mut next: ResMut<NextState<SceneState>>,
    scene: Res<SceneDescription>,
) {
    if let Err(err) = scene.validate() {
        error!("scene description rejected: {err}");
        next.set(SceneState::Unmounted);
        return;
    }

    let registered = match physics.mount(&scene.physics) {
        Ok(registered) => registered,
        Err(err) => {
            error!("failed to register physics bodies: {err}");
            next.set(SceneState::Unmounted);
            return;
        }
    };

    let [r, g, b] = scene.canvas.background;
    commands.insert_resource(ClearColor(Color::srgb_u8(r, g, b)));

    let mut camera = commands.spawn((
        Name::new("Scene Camera"),
        SceneMember,
        camera_bundle(&scene.canvas.camera, &scene.controls),
    ));
    if let Some(ambient) = lighting::ambient_light(&scene.lights) {
        camera.insert(ambient);
    }

    lighting::spawn_directional_lights(&mut commands, &scene.canvas, &scene.lights);

    for (desc, handle) in scene.physics.bodies.iter().zip(registered.handles()) {
        bodies::spawn_body(
            &mut commands,
            &mut meshes,
            &mut materials,
            &physics,
            desc,
            *handle,
        );
    }

    info!("scene mounted with {} physics bodies", registered.len());
    mounted.0 = Some(registered);
}

fn unmount_scene(
    mut commands: Commands,
    mut physics: ResMut<Physics>,
    mut mounted: ResMut<MountedScene>,
    members: Query<Entity, With<SceneMember>>,
) {
    for entity in &members {
        commands.entity(entity).despawn();
    }

    if let Some(registered) = mounted.0.take() {
        physics.unmount(registered);
    }

    info!("scene unmounted");
}
