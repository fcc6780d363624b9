// Re-export Rapier (and its nalgebra) so the client can name physics types without
// depending on `rapier3d` directly and risking a version split.
pub use rapier3d;
pub use rapier3d::na;

use rapier3d::prelude::*;

use crate::constants::{CONTACT_FRICTION, CONTACT_RESTITUTION};

/// Collider shapes used by the scene.
#[derive(Clone, Debug, PartialEq)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space) whose outward normal is the body's local +Z.
    ///
    /// Notes on plane size and rotation
    /// - A half-space is infinite. Any width/height on the visual mesh is purely a
    ///   rendering concern, not collision.
    /// - Local +Z matches the visual plane mesh, so the body rotation alone decides which
    ///   way the plane faces (`(-PI/2, 0, 0)` points it at world +Y).
    Plane,

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },
}

/// Build a Rapier collider builder for `shape`.
///
/// The collider is attached to its parent body with an identity local transform, so the
/// pose stored on the rigid body is the collider pose. Callers add mass before building.
pub fn collider_from_def(shape: &ColliderShapeDef) -> ColliderBuilder {
    let builder = match shape {
        ColliderShapeDef::Plane => ColliderBuilder::halfspace(Vector::z_axis()),
        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
    };

    builder
        .friction(CONTACT_FRICTION)
        .restitution(CONTACT_RESTITUTION)
}
