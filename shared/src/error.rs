use thiserror::Error;

use crate::physics_world::BodyHandle;

/// Errors raised while validating a scene description or touching the physics world.
///
/// Failures inside Rapier itself are not wrapped here; they surface through the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// A dynamic body was described with a mass that is zero, negative or not finite.
    #[error("dynamic body mass must be positive and finite, got {0}")]
    InvalidMass(f32),
    /// A vector field contains NaN or infinity.
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    /// A geometry extent is zero, negative or not finite.
    #[error("{field} must be positive, got {value}")]
    NonPositiveExtent { field: &'static str, value: f32 },
    /// The camera field of view is outside `(0, 180)` degrees.
    #[error("camera field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),
    /// The handle does not refer to a body in this world.
    #[error("no body registered for {0:?}")]
    UnknownBody(BodyHandle),
}
