//! Corelight Scene - The animated "energy core" background
//!
//! A wireframe torus knot spins and pulses in front of a perspective camera,
//! wrapped in exponential-squared fog. Page navigation moves the core and the
//! camera through a [`ViewportController`] handle.

pub mod camera;
pub mod clock;
pub mod models;
pub mod scene;
pub mod viewport;

use bevy::prelude::*;
use corelight_core::SceneConfig;

/// Scene constants shared by the setup and frame systems
#[derive(Debug, Clone, Resource)]
pub struct SceneSettings(pub SceneConfig);

/// Plugin that builds the scene and drives it every frame
pub struct CorelightScenePlugin {
    pub config: SceneConfig,
}

impl Plugin for CorelightScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SceneSettings(self.config.clone()))
            .add_plugins(camera::CameraPlugin)
            .add_plugins(scene::SceneSetupPlugin)
            .add_plugins(models::ModelsPlugin)
            .add_plugins(viewport::ViewportPlugin {
                camera_z: self.config.camera_distance,
            });
    }
}

/// sRGB color from a 0xRRGGBB value and an alpha
pub fn color_from_hex(hex: u32, alpha: f32) -> Color {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Color::srgba(channel(16), channel(8), channel(0), alpha)
}

// Re-export commonly used types
pub use camera::{MainCamera, RenderContext};
pub use models::CoreObject;
pub use viewport::{PlacementTweens, ViewportController};
