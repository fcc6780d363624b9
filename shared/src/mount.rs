//! Mount/unmount of a whole [`PhysicsDesc`] against a [`PhysicsWorld`].
//!
//! Lifecycle is two-state: a description is either mounted (all of its bodies are in the
//! world) or not (none are). [`ScopedScene`] ties the mounted state to a borrow so the
//! bodies are removed when the scope ends.

use crate::{
    SceneError,
    physics_world::{BodyHandle, PhysicsWorld},
    scene::PhysicsDesc,
};

/// Handles of the bodies registered by one mount, in description order.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping MountedBodies leaks its bodies into the world; pass it to unmount"]
pub struct MountedBodies {
    handles: Vec<BodyHandle>,
}

impl MountedBodies {
    pub fn handles(&self) -> &[BodyHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl PhysicsWorld {
    /// Apply the description's gravity and register all of its bodies.
    ///
    /// Either every body is registered or none is: if one is rejected, the bodies
    /// inserted before it are removed again before the error is returned.
    pub fn mount(&mut self, desc: &PhysicsDesc) -> Result<MountedBodies, SceneError> {
        let mut handles = Vec::with_capacity(desc.bodies.len());

        for body in &desc.bodies {
            match self.add(body) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    log::warn!("rejected body description: {err}");
                    for handle in handles {
                        if let Err(err) = self.remove(handle) {
                            log::warn!("mount rollback: {err}");
                        }
                    }
                    return Err(err);
                }
            }
        }

        self.set_gravity(desc.gravity);
        log::debug!("mounted {} bodies", handles.len());
        Ok(MountedBodies { handles })
    }

    /// Remove every body registered by `mounted`.
    pub fn unmount(&mut self, mounted: MountedBodies) {
        let count = mounted.handles.len();
        for handle in mounted.handles {
            if let Err(err) = self.remove(handle) {
                log::warn!("unmount: {err}");
            }
        }
        log::debug!("unmounted {count} bodies");
    }

    /// Mount `desc` for the lifetime of the returned guard.
    pub fn scoped(&mut self, desc: &PhysicsDesc) -> Result<ScopedScene<'_>, SceneError> {
        let mounted = self.mount(desc)?;
        Ok(ScopedScene {
            world: self,
            mounted: Some(mounted),
        })
    }
}

/// A mounted description that unmounts itself on drop.
pub struct ScopedScene<'w> {
    world: &'w mut PhysicsWorld,
    mounted: Option<MountedBodies>,
}

impl ScopedScene<'_> {
    pub fn handles(&self) -> &[BodyHandle] {
        self.mounted
            .as_ref()
            .map(MountedBodies::handles)
            .unwrap_or_default()
    }

    pub fn world(&self) -> &PhysicsWorld {
        self.world
    }

    pub fn step(&mut self) {
        self.world.step();
    }
}

impl Drop for ScopedScene<'_> {
    fn drop(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            self.world.unmount(mounted);
        }
    }
}
