use bevy::prelude::*;
use constants::camera::{
    DRIFT_BASE_DEPTH, DRIFT_TIME_SCALE, FAR, FOV_DEGREES, INITIAL_DISTANCE, NEAR,
};

/// Marker for the single background camera.
#[derive(Component)]
pub struct DriftCamera;

/// Camera position and look-at target after `elapsed` seconds.
///
/// Layered sinusoids give a slow wander that never repeats visibly.
pub fn drift_pose(elapsed: f32) -> (Vec3, Vec3) {
    let t = elapsed * DRIFT_TIME_SCALE;

    let position = Vec3::new(
        (t * 0.6).sin() * 4.0 + (t * 1.8).sin() * 2.0,
        (t * 0.4).cos() * 3.0 + (t * 1.2).cos(),
        DRIFT_BASE_DEPTH + (t * 0.3).sin() * 5.0,
    );
    let target = Vec3::new((t * 0.5).sin(), (t * 0.7).cos() * 0.5, 0.0);

    (position, target)
}

pub fn spawn_drift_camera(commands: &mut Commands, aspect_ratio: f32) -> Entity {
    commands
        .spawn((
            Camera3d::default(),
            Camera {
                clear_color: ClearColorConfig::Custom(Color::NONE),
                ..default()
            },
            Projection::Perspective(PerspectiveProjection {
                fov: FOV_DEGREES.to_radians(),
                near: NEAR,
                far: FAR,
                aspect_ratio,
            }),
            Transform::from_xyz(0.0, 0.0, INITIAL_DISTANCE),
            DriftCamera,
        ))
        .id()
}

pub fn camera_drift_system(
    time: Res<Time>,
    mut cameras: Query<&mut Transform, With<DriftCamera>>,
) {
    let (position, target) = drift_pose(time.elapsed_secs());
    for mut transform in &mut cameras {
        *transform = Transform::from_translation(position).looking_at(target, Vec3::Y);
    }
}

/// Keep the projection aspect in step with the surface.
pub fn set_aspect_ratio(projection: &mut Projection, width: f32, height: f32) {
    if let Projection::Perspective(perspective) = projection {
        if height > 0.0 {
            perspective.aspect_ratio = width / height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_at_zero_starts_in_front_of_the_network() {
        let (position, target) = drift_pose(0.0);
        assert!((position.x).abs() < 1e-6);
        assert!((position.y - 4.0).abs() < 1e-6);
        assert!((position.z - DRIFT_BASE_DEPTH).abs() < 1e-6);
        assert!((target - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn pose_stays_within_drift_envelope() {
        for step in 0..2_000 {
            let (position, target) = drift_pose(step as f32 * 0.37);
            assert!(position.x.abs() <= 6.0 + 1e-4);
            assert!(position.y.abs() <= 4.0 + 1e-4);
            assert!((position.z - DRIFT_BASE_DEPTH).abs() <= 5.0 + 1e-4);
            assert!(target.x.abs() <= 1.0 + 1e-4);
            assert!(target.y.abs() <= 0.5 + 1e-4);
            assert_eq!(target.z, 0.0);
        }
    }

    #[test]
    fn aspect_ratio_ignores_degenerate_height() {
        let mut projection = Projection::Perspective(PerspectiveProjection {
            aspect_ratio: 1.5,
            ..default()
        });
        set_aspect_ratio(&mut projection, 800.0, 0.0);
        set_aspect_ratio(&mut projection, 1200.0, 600.0);
        let Projection::Perspective(perspective) = projection else {
            panic!("expected perspective projection");
        };
        assert!((perspective.aspect_ratio - 2.0).abs() < 1e-6);
    }
}
