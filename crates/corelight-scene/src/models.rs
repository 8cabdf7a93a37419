//! The energy core mesh and its per-frame spin and pulse

use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::alpha::AlphaMode;
use bevy::render::render_resource::PrimitiveTopology;
use corelight_core::motion::{pulse_scale, spin_step};
use corelight_core::TorusKnot;
use tracing::info;

use crate::clock::wall_clock_secs;
use crate::{color_from_hex, SceneSettings};

/// The spinning torus knot
#[derive(Component, Debug, Default)]
pub struct CoreObject {
    /// Accumulated rotation about X in radians
    pub spin_x: f32,
    /// Accumulated rotation about Y in radians
    pub spin_y: f32,
}

/// Plugin for the core mesh
pub struct ModelsPlugin;

impl Plugin for ModelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_core)
            .add_systems(Update, (spin_core, pulse_core));
    }
}

/// Wireframe mesh of the knot as a line list
pub fn core_mesh(knot: &TorusKnot) -> Mesh {
    let positions: Vec<[f32; 3]> = knot.positions().iter().map(|p| p.to_array()).collect();

    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_indices(Indices::U32(knot.edge_indices()))
}

fn spawn_core(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<SceneSettings>,
) {
    let config = &settings.0;
    let knot = TorusKnot::from_config(config);

    let material = materials.add(StandardMaterial {
        base_color: color_from_hex(config.core_color, config.core_opacity),
        // Lines carry no normals
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(core_mesh(&knot))),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        CoreObject::default(),
    ));

    info!(
        vertices = knot.vertex_count(),
        tubular = knot.tubular_segments,
        radial = knot.radial_segments,
        "Energy core spawned"
    );
}

pub(crate) fn spin_core(
    time: Res<Time>,
    settings: Res<SceneSettings>,
    mut cores: Query<(&mut CoreObject, &mut Transform)>,
) {
    let step = spin_step(settings.0.rotation_speed, time.delta_secs());
    for (mut core, mut transform) in &mut cores {
        core.spin_x = (core.spin_x + step) % std::f32::consts::TAU;
        core.spin_y = (core.spin_y + step) % std::f32::consts::TAU;
        transform.rotation = Quat::from_euler(EulerRot::XYZ, core.spin_x, core.spin_y, 0.0);
    }
}

pub(crate) fn pulse_core(
    settings: Res<SceneSettings>,
    mut cores: Query<&mut Transform, With<CoreObject>>,
) {
    let scale = pulse_scale(wall_clock_secs(), settings.0.pulse_amplitude);
    for mut transform in &mut cores {
        transform.scale = Vec3::splat(scale);
    }
}
