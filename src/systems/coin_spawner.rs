// src/systems/coin_spawner.rs - Pooled coin spawning and off-screen recycling
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::*;
use crate::systems::camera::ViewportEdges;
use crate::systems::pool::CoinPool;

/// Depth of the 2D gameplay plane coins live on.
pub const COIN_Z: f32 = 5.0;

const COIN_RADIUS: f32 = 20.0;

#[derive(Component)]
pub struct Coin;

#[derive(Component, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoinKind {
    Gold,
    Silver,
    Bronze,
    Copper,
}

impl CoinKind {
    /// Seconds added to the survival countdown on pickup.
    pub fn bonus_seconds(self) -> f32 {
        match self {
            CoinKind::Gold => 5.0,
            CoinKind::Silver => 3.0,
            CoinKind::Bronze => 2.0,
            CoinKind::Copper => 1.0,
        }
    }
}

/// External systems collect an active coin through this event; the handler
/// mirrors the off-screen recycle path exactly.
#[derive(Event)]
pub struct CoinCollectedEvent {
    pub entity: Entity,
}

#[derive(Resource)]
pub struct SpawnScheduler {
    pub timer: f32,
}

pub fn setup_coin_pool(
    mut commands: Commands,
    config: Res<GameConfig>,
    sprites: Res<GameSprites>,
) {
    let coins = &config.coins;
    if coins.variants.is_empty() {
        error!("CoinSpawner: no coin variants configured, spawner disabled");
        return;
    }

    let mut pool = CoinPool::new(coins.max_on_screen);
    for _ in 0..coins.max_on_screen {
        let kind = coins.variants[fastrand::usize(..coins.variants.len())];
        let coin = spawn_pooled_coin(&mut commands, &sprites, kind);
        pool.seed(coin);
    }

    info!("Coin pool initialized with {} entities", pool.inactive_count());
    commands.insert_resource(pool);
    commands.insert_resource(SpawnScheduler {
        timer: roll_interval(coins.min_spawn_interval, coins.max_spawn_interval),
    });
}

fn spawn_pooled_coin(commands: &mut Commands, sprites: &GameSprites, kind: CoinKind) -> Entity {
    commands
        .spawn((
            create_coin_sprite(sprites, kind),
            Transform::from_translation(Vec3::new(0.0, 0.0, COIN_Z)),
            Visibility::Hidden,
            Collider::ball(COIN_RADIUS),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            CollisionGroups::new(PICKUP_GROUP, CAR_GROUP | WHEEL_GROUP),
            ColliderDisabled,
            kind,
            Coin,
            DrivingSceneEntity,
        ))
        .id()
}

fn activate_coin(commands: &mut Commands, entity: Entity, position: Vec3) {
    if let Ok(mut entity_commands) = commands.get_entity(entity) {
        entity_commands
            .insert((Transform::from_translation(position), Visibility::Visible))
            .remove::<ColliderDisabled>();
    }
}

fn deactivate_coin(commands: &mut Commands, entity: Entity) {
    if let Ok(mut entity_commands) = commands.get_entity(entity) {
        entity_commands.insert((Visibility::Hidden, ColliderDisabled));
    }
}

/// Maps a unit sample onto the closed interval [min, max].
fn interval_from(unit: f32, min: f32, max: f32) -> f32 {
    min + unit * (max - min)
}

fn roll_interval(min: f32, max: f32) -> f32 {
    interval_from(rand::random::<f32>(), min, max)
}

/// Viewport-relative spawn point: a fixed offset past the right edge, with
/// vertical jitter around the camera center.
fn spawn_position_from(edges: &ViewportEdges, coins: &CoinConfig, unit: f32) -> Vec3 {
    let x = edges.right_edge_x + coins.spawn_distance_right;
    let y = edges.center_y + interval_from(unit, -coins.vertical_range, coins.vertical_range);
    Vec3::new(x, y, COIN_Z)
}

fn roll_spawn_position(edges: &ViewportEdges, coins: &CoinConfig) -> Vec3 {
    spawn_position_from(edges, coins, rand::random::<f32>())
}

/// Timer-driven spawn loop. One spawn attempt per expiry at most, and the
/// next interval is re-rolled every expiry whether or not the attempt
/// produced a coin.
pub fn coin_spawn_system(
    mut commands: Commands,
    mut scheduler: ResMut<SpawnScheduler>,
    mut pool: ResMut<CoinPool>,
    edges: Res<ViewportEdges>,
    config: Res<GameConfig>,
    coin_query: Query<&Transform, With<Coin>>,
    time: Res<Time>,
    game_mode: Res<GameMode>,
) {
    if game_mode.paused {
        return;
    }

    scheduler.timer -= time.delta_secs();
    if scheduler.timer > 0.0 {
        return;
    }

    let coins = &config.coins;
    scheduler.timer = roll_interval(coins.min_spawn_interval, coins.max_spawn_interval);

    if pool.inactive_count() == 0 || pool.active_count() >= coins.max_on_screen {
        return;
    }

    let Some(coin) = pool.acquire(|e| coin_query.get(e).is_ok()) else {
        return;
    };

    activate_coin(&mut commands, coin, roll_spawn_position(&edges, coins));
}

/// Per-frame recycle scan: anything that drifted past the despawn boundary
/// on the left goes back to the pool; handles that died externally are
/// dropped from the bookkeeping without touching the entity.
pub fn recycle_scan_system(
    mut commands: Commands,
    mut pool: ResMut<CoinPool>,
    edges: Res<ViewportEdges>,
    config: Res<GameConfig>,
    coin_query: Query<&Transform, With<Coin>>,
) {
    let despawn_x = edges.left_edge_x - config.coins.despawn_distance_left;

    let released = pool.scan_release(
        |e| coin_query.get(e).is_ok(),
        |e| coin_query
            .get(e)
            .map(|transform| transform.translation.x < despawn_x)
            .unwrap_or(false),
    );

    for entity in released {
        deactivate_coin(&mut commands, entity);
    }
}

/// Release path for collected coins. A handle that is not currently active
/// (already recycled, double event, stale) is a silent no-op.
pub fn coin_collect_system(
    mut commands: Commands,
    mut pool: ResMut<CoinPool>,
    mut collected: EventReader<CoinCollectedEvent>,
) {
    for event in collected.read() {
        if pool.release(event.entity) {
            deactivate_coin(&mut commands, event.entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_coin_config() -> CoinConfig {
        GameConfig::default().coins
    }

    #[test]
    fn interval_hits_bounds_exactly() {
        assert_eq!(interval_from(0.0, 0.5, 1.5), 0.5);
        assert_eq!(interval_from(1.0, 0.5, 1.5), 1.5);
        assert_eq!(interval_from(0.5, 0.5, 1.5), 1.0);
    }

    #[test]
    fn interval_is_constant_when_min_equals_max() {
        for _ in 0..100 {
            assert_eq!(roll_interval(0.75, 0.75), 0.75);
        }
    }

    #[test]
    fn rolled_intervals_stay_inside_bounds() {
        for _ in 0..1000 {
            let interval = roll_interval(0.5, 1.5);
            assert!((0.5..=1.5).contains(&interval));
        }
    }

    #[test]
    fn spawn_position_is_exact_with_zero_vertical_range() {
        let edges = ViewportEdges {
            left_edge_x: -10.0,
            right_edge_x: 10.0,
            center_y: 2.0,
        };
        let mut coins = test_coin_config();
        coins.spawn_distance_right = 15.0;
        coins.vertical_range = 0.0;

        for unit in [0.0, 0.25, 1.0] {
            let position = spawn_position_from(&edges, &coins, unit);
            assert_eq!(position, Vec3::new(25.0, 2.0, COIN_Z));
        }
    }

    #[test]
    fn spawn_position_jitter_stays_inside_vertical_range() {
        let edges = ViewportEdges {
            left_edge_x: 0.0,
            right_edge_x: 100.0,
            center_y: 50.0,
        };
        let coins = test_coin_config();

        for _ in 0..1000 {
            let position = roll_spawn_position(&edges, &coins);
            assert_eq!(position.x, 100.0 + coins.spawn_distance_right);
            assert!(position.y >= 50.0 - coins.vertical_range);
            assert!(position.y <= 50.0 + coins.vertical_range);
        }
    }

    #[test]
    fn coin_bonus_seconds_match_variants() {
        assert_eq!(CoinKind::Gold.bonus_seconds(), 5.0);
        assert_eq!(CoinKind::Silver.bonus_seconds(), 3.0);
        assert_eq!(CoinKind::Bronze.bonus_seconds(), 2.0);
        assert_eq!(CoinKind::Copper.bonus_seconds(), 1.0);
    }

    #[test]
    fn scan_recycles_entity_left_of_boundary() {
        use crate::systems::pool::CoinPool;
        use std::collections::HashMap;

        let mut world = World::new();
        let near = world.spawn_empty().id();
        let far = world.spawn_empty().id();

        let mut positions = HashMap::new();
        positions.insert(near, 0.0_f32);
        positions.insert(far, -101.0_f32);

        let mut pool = CoinPool::new(2);
        pool.seed(near);
        pool.seed(far);
        pool.acquire(|_| true);
        pool.acquire(|_| true);

        let despawn_x = -100.0;
        let released = pool.scan_release(
            |_| true,
            |e| positions[&e] < despawn_x,
        );

        assert_eq!(released, vec![far]);
        assert_eq!(pool.active_count(), 1);
        assert_eq!(pool.inactive_count(), 1);
    }
}
