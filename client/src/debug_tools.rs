//! Debug/performance tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (`#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).

use bevy::diagnostic::{
    Diagnostic, DiagnosticPath, Diagnostics, EntityCountDiagnosticsPlugin,
    FrameTimeDiagnosticsPlugin, RegisterDiagnostic, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;

use crate::physics::Physics;

/// Number of rigid bodies registered in the physics world.
pub const PHYSICS_BODY_COUNT: DiagnosticPath = DiagnosticPath::const_new("physics/bodies");

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.register_diagnostic(Diagnostic::new(PHYSICS_BODY_COUNT));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(Update, measure_physics_bodies);
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn measure_physics_bodies(mut diagnostics: Diagnostics, physics: Res<Physics>) {
    diagnostics.add_measurement(&PHYSICS_BODY_COUNT, || physics.body_count() as f64);
}
