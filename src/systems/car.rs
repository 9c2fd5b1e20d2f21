// src/systems/car.rs - Physics car: body, wheels, drive torque, jump
use bevy::audio::AudioSinkPlayback;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::core::*;
use crate::systems::collectibles::Survival;

const WHEEL_RADIUS: f32 = 35.0;
const WHEEL_OFFSETS: [Vec2; 2] = [Vec2::new(-75.0, -45.0), Vec2::new(75.0, -45.0)];
const CAR_Z: f32 = 10.0;

#[derive(Component)]
pub struct CarBody;

#[derive(Component)]
pub struct CarWheel;

#[derive(Component)]
pub struct Car {
    pub jump_timer: f32,
}

#[derive(Component)]
pub struct EngineSound;

pub fn spawn_car(
    commands: &mut Commands,
    config: &GameConfig,
    sprites: &GameSprites,
    audio: &GameAudio,
    position: Vec2,
) -> Entity {
    let body = commands
        .spawn((
            create_car_body_sprite(sprites),
            Transform::from_translation(position.extend(CAR_Z)),
            CarBody,
            Car { jump_timer: 0.0 },
            RigidBody::Dynamic,
            Collider::cuboid(110.0, 35.0),
            Velocity::default(),
            ExternalForce::default(),
            ExternalImpulse::default(),
            CollisionGroups::new(CAR_GROUP, GROUND_GROUP | PICKUP_GROUP),
            ActiveEvents::COLLISION_EVENTS,
            DrivingSceneEntity,
        ))
        .id();

    for offset in WHEEL_OFFSETS {
        commands.spawn((
            create_wheel_sprite(sprites),
            Transform::from_translation((position + offset).extend(CAR_Z + 1.0)),
            CarWheel,
            RigidBody::Dynamic,
            Collider::ball(WHEEL_RADIUS),
            Velocity::default(),
            ExternalForce::default(),
            Friction::coefficient(1.2),
            Restitution::coefficient(0.1),
            CollisionGroups::new(WHEEL_GROUP, GROUND_GROUP | TRAIL_GROUP | PICKUP_GROUP),
            ImpulseJoint::new(body, RevoluteJointBuilder::new().local_anchor1(offset)),
            DrivingSceneEntity,
        ));
    }

    // Looping engine noise; pitch tracks drive input, silence tracks fuel.
    commands.spawn((
        AudioPlayer(audio.engine.clone()),
        PlaybackSettings::LOOP,
        EngineSound,
        DrivingSceneEntity,
    ));

    body
}

/// Drive input collapsed to [-1, 1]; right is forward.
fn drive_axis(action_state: &ActionState<PlayerAction>) -> f32 {
    let mut axis = 0.0;
    if action_state.pressed(&PlayerAction::Accelerate) {
        axis += 1.0;
    }
    if action_state.pressed(&PlayerAction::Reverse) {
        axis -= 1.0;
    }
    axis
}

/// Torque on both wheels plus a lean torque on the body, original arcade
/// style. Wheels spin clockwise for forward motion, hence the negation.
pub fn car_drive_system(
    action_query: Query<&ActionState<PlayerAction>>,
    mut wheel_query: Query<&mut ExternalForce, (With<CarWheel>, Without<CarBody>)>,
    mut body_query: Query<&mut ExternalForce, With<CarBody>>,
    survival: Res<Survival>,
    config: Res<GameConfig>,
    game_mode: Res<GameMode>,
) {
    if game_mode.paused {
        return;
    }
    let Ok(action_state) = action_query.single() else { return; };

    let axis = if survival.fuel > 0.0 { drive_axis(action_state) } else { 0.0 };

    for mut force in wheel_query.iter_mut() {
        force.torque = -axis * config.car.drive_torque;
    }
    if let Ok(mut force) = body_query.single_mut() {
        force.torque = -axis * config.car.rotation_torque;
    }
}

pub fn car_jump_system(
    action_query: Query<&ActionState<PlayerAction>>,
    mut body_query: Query<(&mut Car, &mut ExternalImpulse), With<CarBody>>,
    survival: Res<Survival>,
    config: Res<GameConfig>,
    time: Res<Time>,
    game_mode: Res<GameMode>,
) {
    if game_mode.paused {
        return;
    }
    let Ok(action_state) = action_query.single() else { return; };
    let Ok((mut car, mut impulse)) = body_query.single_mut() else { return; };

    // Impulses are one-shot; clear last frame's before deciding this one.
    impulse.impulse = Vec2::ZERO;
    impulse.torque_impulse = 0.0;

    car.jump_timer -= time.delta_secs();

    if action_state.just_pressed(&PlayerAction::Jump)
        && car.jump_timer <= 0.0
        && survival.fuel > 0.0
    {
        impulse.impulse = Vec2::Y * config.car.jump_impulse;
        car.jump_timer = config.car.jump_cooldown;
    }
}

pub fn engine_audio_system(
    action_query: Query<&ActionState<PlayerAction>>,
    sink_query: Query<&AudioSink, With<EngineSound>>,
    survival: Res<Survival>,
) {
    let Ok(action_state) = action_query.single() else { return; };
    let Ok(sink) = sink_query.single() else { return; };

    if survival.fuel <= 0.0 {
        if !sink.is_paused() {
            sink.pause();
        }
        return;
    }

    if sink.is_paused() {
        sink.play();
    }
    sink.set_speed(0.6 + 0.8 * drive_axis(action_state).abs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_axis_collapses_input() {
        let mut action_state = ActionState::<PlayerAction>::default();
        assert_eq!(drive_axis(&action_state), 0.0);

        action_state.press(&PlayerAction::Accelerate);
        assert_eq!(drive_axis(&action_state), 1.0);

        action_state.press(&PlayerAction::Reverse);
        assert_eq!(drive_axis(&action_state), 0.0);

        action_state.release(&PlayerAction::Accelerate);
        assert_eq!(drive_axis(&action_state), -1.0);
    }
}
