//! Camera and core placement driven from outside the frame loop
//!
//! The page router runs in DOM event handlers, not in Bevy systems. It
//! holds a clone of [`ViewportController`] and posts placement targets into
//! it; a frame system picks up the newest target and retargets the tweens
//! from wherever the camera and core currently are.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use corelight_core::{Tween, TransformTargetSink, TransitionTarget};
use tracing::debug;

use crate::camera::MainCamera;
use crate::models::CoreObject;

/// Shared handle for requesting a new camera/core placement
#[derive(Resource, Clone, Default)]
pub struct ViewportController {
    pending: Arc<Mutex<Option<TransitionTarget>>>,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the newest unapplied target, if any
    pub fn take_pending(&self) -> Option<TransitionTarget> {
        self.pending.lock().ok().and_then(|mut pending| pending.take())
    }
}

impl TransformTargetSink for ViewportController {
    fn set_transform_target(&mut self, target: TransitionTarget) {
        if let Ok(mut pending) = self.pending.lock() {
            // Last caller wins
            *pending = Some(target);
        }
    }
}

/// In-flight interpolation of the core x position and camera z position
#[derive(Debug, Clone, Resource)]
pub struct PlacementTweens {
    pub core_x: Tween,
    pub camera_z: Tween,
}

pub struct ViewportPlugin {
    /// Camera z the scene starts at
    pub camera_z: f32,
}

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportController>()
            .insert_resource(PlacementTweens {
                core_x: Tween::at_rest(0.0),
                camera_z: Tween::at_rest(self.camera_z),
            })
            .add_systems(Update, (apply_viewport_targets, advance_placement).chain());
    }
}

pub(crate) fn apply_viewport_targets(
    controller: Res<ViewportController>,
    mut tweens: ResMut<PlacementTweens>,
    cores: Query<&Transform, (With<CoreObject>, Without<MainCamera>)>,
    cameras: Query<&Transform, (With<MainCamera>, Without<CoreObject>)>,
) {
    let Some(target) = controller.take_pending() else {
        return;
    };

    let core_x = cores
        .single()
        .map(|t| t.translation.x)
        .unwrap_or(tweens.core_x.value());
    let camera_z = cameras
        .single()
        .map(|t| t.translation.z)
        .unwrap_or(tweens.camera_z.value());

    tweens.core_x.retarget(core_x, target.core_x, target.duration_secs);
    tweens.camera_z.retarget(camera_z, target.camera_z, target.duration_secs);
    debug!(
        from_x = core_x,
        to_x = target.core_x,
        from_z = camera_z,
        to_z = target.camera_z,
        "Retargeted viewport placement"
    );
}

pub(crate) fn advance_placement(
    time: Res<Time>,
    mut tweens: ResMut<PlacementTweens>,
    mut cores: Query<&mut Transform, (With<CoreObject>, Without<MainCamera>)>,
    mut cameras: Query<&mut Transform, (With<MainCamera>, Without<CoreObject>)>,
) {
    if tweens.core_x.is_finished() && tweens.camera_z.is_finished() {
        return;
    }

    let dt = time.delta_secs();
    let core_x = tweens.core_x.advance(dt);
    let camera_z = tweens.camera_z.advance(dt);

    for mut transform in &mut cores {
        transform.translation.x = core_x;
    }
    for mut transform in &mut cameras {
        transform.translation.z = camera_z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn frame_app() -> (App, ViewportController) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .add_plugins(ViewportPlugin { camera_z: 30.0 });
        app.world_mut().spawn((Transform::IDENTITY, CoreObject::default()));
        app.world_mut().spawn((Transform::from_xyz(0.0, 0.0, 30.0), MainCamera));
        let controller = app.world().resource::<ViewportController>().clone();
        (app, controller)
    }

    fn placement(app: &mut App) -> (f32, f32) {
        let mut cores = app.world_mut().query_filtered::<&Transform, With<CoreObject>>();
        let core_x = cores.single(app.world()).unwrap().translation.x;
        let mut cameras = app.world_mut().query_filtered::<&Transform, With<MainCamera>>();
        let camera_z = cameras.single(app.world()).unwrap().translation.z;
        (core_x, camera_z)
    }

    #[test]
    fn test_moves_to_target_within_duration() {
        let (mut app, mut controller) = frame_app();
        controller.set_transform_target(TransitionTarget {
            core_x: 20.0,
            camera_z: 25.0,
            duration_secs: 1.0,
        });

        app.update();
        app.update();
        app.update();
        let (mid_x, mid_z) = placement(&mut app);
        assert!(mid_x > 0.0 && mid_x < 20.0);
        assert!(mid_z < 30.0 && mid_z > 25.0);

        for _ in 0..15 {
            app.update();
        }
        let (x, z) = placement(&mut app);
        assert!((x - 20.0).abs() < 1e-4);
        assert!((z - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_retarget_mid_flight_continues_from_current() {
        let (mut app, mut controller) = frame_app();
        controller.set_transform_target(TransitionTarget {
            core_x: 20.0,
            camera_z: 25.0,
            duration_secs: 1.0,
        });
        for _ in 0..4 {
            app.update();
        }
        let (x_before, _) = placement(&mut app);

        controller.set_transform_target(TransitionTarget {
            core_x: 0.0,
            camera_z: 30.0,
            duration_secs: 1.0,
        });
        app.update();
        let (x_after, _) = placement(&mut app);
        // No jump back to either end
        assert!(x_after <= x_before);
        assert!(x_after > 0.0);

        for _ in 0..15 {
            app.update();
        }
        let (x, z) = placement(&mut app);
        assert!(x.abs() < 1e-4);
        assert!((z - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_last_target_wins() {
        let mut controller = ViewportController::new();
        let home = TransitionTarget {
            core_x: 0.0,
            camera_z: 30.0,
            duration_secs: 1.0,
        };
        let other = TransitionTarget {
            core_x: 20.0,
            camera_z: 25.0,
            duration_secs: 1.0,
        };
        controller.set_transform_target(other);
        controller.clone().set_transform_target(home);
        assert_eq!(controller.take_pending(), Some(home));
        assert_eq!(controller.take_pending(), None);
    }
}
