// src/systems/camera.rs - Follow camera, speed zoom and viewport tracking
use bevy::prelude::*;
use bevy::render::camera::{OrthographicProjection, Projection};
use bevy_rapier2d::prelude::*;

use crate::core::*;
use crate::systems::car::CarBody;

#[derive(Component)]
pub struct MainCamera;

/// World-space edges of the visible camera window, refreshed every frame.
/// The coin spawner reads these to place and recycle entities.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct ViewportEdges {
    pub left_edge_x: f32,
    pub right_edge_x: f32,
    pub center_y: f32,
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection::default_2d()),
        MainCamera,
    ));
}

pub fn camera_follow_system(
    mut camera_query: Query<&mut Transform, (With<MainCamera>, Without<CarBody>)>,
    car_query: Query<&Transform, With<CarBody>>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else { return; };
    let Ok(car_transform) = car_query.single() else { return; };

    let target = car_transform.translation.truncate();
    let current = camera_transform.translation.truncate();
    let blend = (config.camera.follow_rate * time.delta_secs()).min(1.0);
    let next = current.lerp(target, blend);

    camera_transform.translation.x = next.x;
    camera_transform.translation.y = next.y;
}

/// Zoom target grows with speed so the horizon opens up at pace.
fn zoom_target(speed_mps: f32, camera: &CameraConfig) -> f32 {
    let t = (speed_mps / camera.zoom_max_speed).clamp(0.0, 1.0);
    camera.min_zoom + (camera.max_zoom - camera.min_zoom) * t
}

pub fn dynamic_zoom_system(
    mut camera_query: Query<&mut Projection, With<MainCamera>>,
    car_query: Query<&Velocity, With<CarBody>>,
    config: Res<GameConfig>,
    time: Res<Time>,
) {
    let Ok(mut projection) = camera_query.single_mut() else { return; };
    let Ok(velocity) = car_query.single() else { return; };

    let Projection::Orthographic(ortho) = projection.as_mut() else { return; };

    let speed_mps = velocity.linvel.length() / PIXELS_PER_METER;
    let target = zoom_target(speed_mps, &config.camera);
    let blend = (config.camera.zoom_rate * time.delta_secs()).min(1.0);
    ortho.scale += (target - ortho.scale) * blend;
}

fn edges_from(camera_pos: Vec2, area: Rect) -> ViewportEdges {
    ViewportEdges {
        left_edge_x: camera_pos.x + area.min.x,
        right_edge_x: camera_pos.x + area.max.x,
        center_y: camera_pos.y,
    }
}

pub fn viewport_tracking_system(
    camera_query: Query<(&Transform, &Projection), With<MainCamera>>,
    mut edges: ResMut<ViewportEdges>,
) {
    let Ok((transform, projection)) = camera_query.single() else { return; };
    let Projection::Orthographic(ortho) = projection else { return; };

    *edges = edges_from(transform.translation.truncate(), ortho.area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_config() -> CameraConfig {
        GameConfig::default().camera
    }

    #[test]
    fn zoom_target_clamps_to_bounds() {
        let camera = camera_config();
        assert_eq!(zoom_target(0.0, &camera), camera.min_zoom);
        assert_eq!(zoom_target(camera.zoom_max_speed, &camera), camera.max_zoom);
        assert_eq!(zoom_target(camera.zoom_max_speed * 10.0, &camera), camera.max_zoom);
    }

    #[test]
    fn zoom_target_interpolates_midway() {
        let camera = camera_config();
        let mid = zoom_target(camera.zoom_max_speed / 2.0, &camera);
        assert!(mid > camera.min_zoom && mid < camera.max_zoom);
    }

    #[test]
    fn edges_follow_camera_position() {
        let area = Rect::new(-640.0, -360.0, 640.0, 360.0);
        let edges = edges_from(Vec2::new(1000.0, 50.0), area);
        assert_eq!(edges.left_edge_x, 360.0);
        assert_eq!(edges.right_edge_x, 1640.0);
        assert_eq!(edges.center_y, 50.0);
    }
}
