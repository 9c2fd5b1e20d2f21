// src/systems/trail.rs - Time-windowed trail line behind the car
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::*;
use crate::systems::car::CarBody;

/// Minimum travel distance between recorded points.
const TRAIL_RESOLUTION: f32 = 15.0;
/// Seconds a point survives before the window evicts it.
const TRAIL_WINDOW: f32 = 2.5;
const TRAIL_COLOR: Color = Color::srgb(0.3, 0.8, 1.0);

#[derive(Component, Default)]
pub struct TrailLine {
    points: Vec<Vec2>,
    stamps: Vec<f32>,
}

impl TrailLine {
    fn starting_at(position: Vec2, now: f32) -> Self {
        Self {
            points: vec![position],
            stamps: vec![now],
        }
    }

    fn can_append(&self, position: Vec2) -> bool {
        match self.points.last() {
            Some(last) => last.distance(position) > TRAIL_RESOLUTION,
            None => true,
        }
    }

    fn append(&mut self, position: Vec2, now: f32) {
        self.points.push(position);
        self.stamps.push(now);
    }

    /// Drops points older than the window from the front; returns whether
    /// anything was removed.
    fn evict_expired(&mut self, now: f32) -> bool {
        let mut removed = false;
        while !self.stamps.is_empty() && now - self.stamps[0] > TRAIL_WINDOW {
            self.stamps.remove(0);
            self.points.remove(0);
            removed = true;
        }
        removed
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }
}

/// The line entity currently being extended behind the car.
#[derive(Resource, Default)]
pub struct ActiveTrail {
    pub line: Option<Entity>,
}

fn refresh_collider(commands: &mut Commands, entity: Entity, line: &TrailLine) {
    let Ok(mut entity_commands) = commands.get_entity(entity) else { return; };
    if line.points.len() >= 2 {
        entity_commands.insert((
            Collider::polyline(line.points.clone(), None),
            CollisionGroups::new(TRAIL_GROUP, WHEEL_GROUP),
        ));
    } else {
        entity_commands.remove::<Collider>();
    }
}

pub fn trail_emit_system(
    mut commands: Commands,
    mut active_trail: ResMut<ActiveTrail>,
    car_query: Query<&Transform, With<CarBody>>,
    mut line_query: Query<&mut TrailLine>,
    time: Res<Time>,
    game_mode: Res<GameMode>,
) {
    if game_mode.paused {
        return;
    }
    let Ok(car_transform) = car_query.single() else { return; };

    let position = car_transform.translation.truncate() - Vec2::new(0.0, 70.0);
    let now = time.elapsed_secs();

    let line_entity = match active_trail.line.filter(|&e| line_query.get(e).is_ok()) {
        Some(entity) => entity,
        None => {
            let entity = commands
                .spawn((
                    TrailLine::starting_at(position, now),
                    Transform::IDENTITY,
                    Visibility::default(),
                    DrivingSceneEntity,
                ))
                .id();
            active_trail.line = Some(entity);
            return;
        }
    };

    let Ok(mut line) = line_query.get_mut(line_entity) else { return; };
    if line.can_append(position) {
        line.append(position, now);
        refresh_collider(&mut commands, line_entity, &line);
    }
}

pub fn trail_window_system(
    mut commands: Commands,
    mut active_trail: ResMut<ActiveTrail>,
    mut line_query: Query<(Entity, &mut TrailLine)>,
    time: Res<Time>,
    game_mode: Res<GameMode>,
) {
    if game_mode.paused {
        return;
    }
    let now = time.elapsed_secs();

    for (entity, mut line) in line_query.iter_mut() {
        if !line.evict_expired(now) {
            continue;
        }

        if line.is_empty() {
            commands.entity(entity).insert(MarkedForDespawn);
            if active_trail.line == Some(entity) {
                active_trail.line = None;
            }
        } else {
            refresh_collider(&mut commands, entity, &line);
        }
    }
}

pub fn trail_render_system(mut gizmos: Gizmos, line_query: Query<&TrailLine>) {
    for line in line_query.iter() {
        if line.points.len() >= 2 {
            gizmos.linestrip_2d(line.points.iter().copied(), TRAIL_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_respects_resolution_threshold() {
        let mut line = TrailLine::starting_at(Vec2::ZERO, 0.0);
        assert!(!line.can_append(Vec2::new(TRAIL_RESOLUTION * 0.5, 0.0)));
        assert!(line.can_append(Vec2::new(TRAIL_RESOLUTION * 2.0, 0.0)));

        line.append(Vec2::new(TRAIL_RESOLUTION * 2.0, 0.0), 0.1);
        assert_eq!(line.points().len(), 2);
    }

    #[test]
    fn eviction_drops_only_expired_points() {
        let mut line = TrailLine::starting_at(Vec2::ZERO, 0.0);
        line.append(Vec2::new(20.0, 0.0), 1.0);
        line.append(Vec2::new(40.0, 0.0), 2.0);

        // At t=3.0 only the t=0.0 point is past the 2.5s window.
        assert!(line.evict_expired(3.0));
        assert_eq!(line.points(), &[Vec2::new(20.0, 0.0), Vec2::new(40.0, 0.0)]);

        assert!(!line.evict_expired(3.2));
        assert_eq!(line.points().len(), 2);
    }

    #[test]
    fn line_empties_once_window_passes_everything() {
        let mut line = TrailLine::starting_at(Vec2::ZERO, 0.0);
        line.append(Vec2::new(20.0, 0.0), 0.5);

        assert!(line.evict_expired(10.0));
        assert!(line.is_empty());
    }
}
