//! Scene setup - the neon point light

use bevy::prelude::*;

use crate::{color_from_hex, SceneSettings};

/// Marker component for the neon point light
#[derive(Component)]
pub struct NeonLight;

/// Plugin for scene setup
pub struct SceneSetupPlugin;

impl Plugin for SceneSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_lights);
    }
}

fn spawn_lights(mut commands: Commands, settings: Res<SceneSettings>) {
    let config = &settings.0;
    let [x, y, z] = config.point_light_position;

    // Ambient fill rides on the camera; this is the colored key light
    commands.spawn((
        PointLight {
            color: color_from_hex(config.point_light_color, 1.0),
            intensity: config.point_light_intensity,
            range: config.point_light_range,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(x, y, z),
        NeonLight,
    ));
}
