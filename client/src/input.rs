use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

/// Pointer actions consumed by the orbit camera.
#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraAction {
    /// Hold to rotate around the focus.
    Rotate,
    /// Hold to pan the focus.
    Pan,
    /// Pointer movement this frame, in pixels.
    #[actionlike(DualAxis)]
    Look,
    /// Scroll wheel; positive zooms in.
    #[actionlike(Axis)]
    Zoom,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<CameraAction>::default());

    app.register_type::<CameraAction>();

    app.insert_resource(default_input_map());
    app.insert_resource(ActionState::<CameraAction>::default());
}

/// Left drag rotates, right drag pans, wheel zooms.
pub fn default_input_map() -> InputMap<CameraAction> {
    InputMap::default()
        .with(CameraAction::Rotate, MouseButton::Left)
        .with(CameraAction::Pan, MouseButton::Right)
        .with_dual_axis(CameraAction::Look, MouseMove::default())
        .with_axis(CameraAction::Zoom, MouseScrollAxis::Y)
}
