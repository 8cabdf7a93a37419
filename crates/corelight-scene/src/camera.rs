//! Perspective camera, fog, and viewport resize handling

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use corelight_core::motion::aspect_ratio;
use tracing::{debug, info};

use crate::{color_from_hex, SceneSettings};

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Last viewport the camera projection was fitted to
#[derive(Debug, Clone, Resource)]
pub struct RenderContext {
    pub width: f32,
    pub height: f32,
    pub aspect: f32,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            aspect: 1.0,
        }
    }
}

/// Plugin for the camera and its projection
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RenderContext>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, handle_resize);
    }
}

fn spawn_camera(mut commands: Commands, settings: Res<SceneSettings>) {
    let config = &settings.0;

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.camera_fov_degrees.to_radians(),
            near: config.camera_near,
            far: config.camera_far,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, config.camera_distance)
            .looking_at(Vec3::ZERO, Vec3::Y),
        DistanceFog {
            color: color_from_hex(config.fog_color, 1.0),
            falloff: FogFalloff::ExponentialSquared {
                density: config.fog_density,
            },
            ..default()
        },
        AmbientLight {
            color: color_from_hex(config.ambient_color, 1.0),
            brightness: config.ambient_brightness,
            ..default()
        },
        MainCamera,
    ));

    info!(
        fov = config.camera_fov_degrees,
        distance = config.camera_distance,
        "Camera spawned"
    );
}

/// Refit the projection whenever the primary window changes size
pub(crate) fn handle_resize(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut context: ResMut<RenderContext>,
    mut projections: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    let Some(aspect) = aspect_ratio(width, height) else {
        // Collapsed canvas (e.g. hidden tab); keep the last projection
        return;
    };
    if context.width == width && context.height == height {
        return;
    }

    *context = RenderContext {
        width,
        height,
        aspect,
    };
    for mut projection in &mut projections {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = aspect;
        }
    }
    debug!(width, height, aspect, "Viewport resized");
}
