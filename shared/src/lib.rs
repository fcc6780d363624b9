pub mod constants;
pub mod error;
pub mod mount;
pub mod physics_world;
pub mod rapier;
pub mod scene;

pub use error::SceneError;
pub use mount::{MountedBodies, ScopedScene};
pub use physics_world::{BodyHandle, BodyKind, PhysicsWorld, Pose};
pub use rapier::{ColliderShapeDef, collider_from_def, na};
pub use scene::{
    BodyDesc, BoxGeometry, CameraDesc, CanvasDesc, DynamicBodyDesc, LightDesc, MaterialDesc,
    OrbitControlsDesc, PhysicsDesc, PlaneGeometry, SceneDesc, StaticGroundDesc, euler_xyz,
};
