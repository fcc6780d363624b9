use bevy::prelude::*;
use boxfall_shared::{CanvasDesc, LightDesc};

use super::SceneMember;
use crate::physics::to_vec3;

/// Ambient brightness (cd/m^2) for an intensity of 1.
const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 500.0;

/// Directional illuminance (lux) for an intensity of 1.
const ILLUMINANCE_PER_UNIT: f32 = 10_000.0;

/// Combined ambient light of the description, if it has any.
///
/// Ambient lights add up, so several entries collapse into one component.
pub(super) fn ambient_light(lights: &[LightDesc]) -> Option<AmbientLight> {
    let intensity: Option<f32> = lights
        .iter()
        .filter_map(|light| match light {
            LightDesc::Ambient { intensity } => Some(*intensity),
            _ => None,
        })
        .reduce(|a, b| a + b);

    intensity.map(|intensity| AmbientLight {
        color: Color::WHITE,
        brightness: intensity * AMBIENT_BRIGHTNESS_PER_UNIT,
        ..default()
    })
}

/// Spawn one entity per directional light, aimed at the origin.
pub(super) fn spawn_directional_lights(
    commands: &mut Commands,
    canvas: &CanvasDesc,
    lights: &[LightDesc],
) {
    for light in lights {
        let LightDesc::Directional {
            position,
            intensity,
            cast_shadow,
        } = light
        else {
            continue;
        };

        commands.spawn((
            SceneMember,
            DirectionalLight {
                illuminance: intensity * ILLUMINANCE_PER_UNIT,
                shadows_enabled: canvas.shadows && *cast_shadow,
                ..default()
            },
            Transform::from_translation(to_vec3(position)).looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }
}
