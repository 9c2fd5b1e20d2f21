// src/systems/scenes.rs - Driving scene assembly and teardown
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::*;
use crate::systems::car::spawn_car;
use crate::systems::collectibles::{FuelCan, RunOverSequence, Survival};
use crate::systems::coin_spawner::SpawnScheduler;
use crate::systems::pool::CoinPool;
use crate::systems::trail::ActiveTrail;
use crate::systems::ui::hud::RunStats;

const GROUND_Y: f32 = -250.0;
const GROUND_HALF_LENGTH: f32 = 60_000.0;
const GROUND_HALF_HEIGHT: f32 = 60.0;
const CAR_START: Vec2 = Vec2::new(0.0, 0.0);
const FUEL_CAN_SPACING: f32 = 2_500.0;

pub fn setup_driving_scene(
    mut commands: Commands,
    mut virtual_time: ResMut<Time<Virtual>>,
    config: Res<GameConfig>,
    sprites: Res<GameSprites>,
    audio: Res<GameAudio>,
) {
    virtual_time.unpause();
    virtual_time.set_relative_speed(1.0);

    commands.insert_resource(GameMode::default());
    commands.insert_resource(Survival::from_config(&config.survival));
    commands.insert_resource(RunStats::default());
    commands.insert_resource(ActiveTrail::default());

    spawn_ground(&mut commands);
    spawn_fuel_cans(&mut commands, &sprites);
    spawn_car(&mut commands, &config, &sprites, &audio, CAR_START);

    info!("Driving scene ready");
}

fn spawn_ground(commands: &mut Commands) {
    commands.spawn((
        Sprite {
            color: Color::srgb(0.25, 0.2, 0.15),
            custom_size: Some(Vec2::new(GROUND_HALF_LENGTH * 2.0, GROUND_HALF_HEIGHT * 2.0)),
            ..default()
        },
        Transform::from_translation(Vec3::new(GROUND_HALF_LENGTH - 2_000.0, GROUND_Y, 0.0)),
        RigidBody::Fixed,
        Collider::cuboid(GROUND_HALF_LENGTH, GROUND_HALF_HEIGHT),
        Friction::coefficient(1.0),
        CollisionGroups::new(GROUND_GROUP, CAR_GROUP | WHEEL_GROUP),
        DrivingSceneEntity,
    ));

    // A few ramps along the way so the car has something to launch from.
    for (x, angle) in [(3_000.0, 0.18), (7_500.0, -0.22), (13_000.0, 0.3)] {
        spawn_ramp(commands, x, angle);
    }
}

fn spawn_ramp(commands: &mut Commands, x: f32, angle: f32) {
    commands.spawn((
        Sprite {
            color: Color::srgb(0.3, 0.25, 0.2),
            custom_size: Some(Vec2::new(800.0, 40.0)),
            ..default()
        },
        Transform::from_translation(Vec3::new(x, GROUND_Y + GROUND_HALF_HEIGHT + 20.0, 0.1))
            .with_rotation(Quat::from_rotation_z(angle)),
        RigidBody::Fixed,
        Collider::cuboid(400.0, 20.0),
        Friction::coefficient(1.0),
        CollisionGroups::new(GROUND_GROUP, CAR_GROUP | WHEEL_GROUP),
        DrivingSceneEntity,
    ));
}

fn spawn_fuel_cans(commands: &mut Commands, sprites: &GameSprites) {
    let mut x = FUEL_CAN_SPACING;
    while x < GROUND_HALF_LENGTH * 2.0 - 2_000.0 {
        commands.spawn((
            create_fuel_can_sprite(sprites),
            Transform::from_translation(Vec3::new(x, GROUND_Y + GROUND_HALF_HEIGHT + 100.0, 4.0)),
            FuelCan,
            Collider::cuboid(22.0, 30.0),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            CollisionGroups::new(PICKUP_GROUP, CAR_GROUP | WHEEL_GROUP),
            DrivingSceneEntity,
        ));
        x += FUEL_CAN_SPACING;
    }
}

pub fn cleanup_driving_scene(
    mut commands: Commands,
    query: Query<Entity, With<DrivingSceneEntity>>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert(MarkedForDespawn);
    }

    commands.remove_resource::<CoinPool>();
    commands.remove_resource::<SpawnScheduler>();
    commands.remove_resource::<RunOverSequence>();
}
