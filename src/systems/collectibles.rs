// src/systems/collectibles.rs - Fuel, countdown, pickups and the run-over sequence
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

use crate::core::*;
use crate::systems::car::{CarBody, CarWheel};
use crate::systems::coin_spawner::{Coin, CoinCollectedEvent, CoinKind};
use crate::systems::floating_text::spawn_floating_text;

/// Scene-placed refueling pickup; not part of the coin pool.
#[derive(Component)]
pub struct FuelCan;

#[derive(Resource)]
pub struct Survival {
    pub fuel: f32,
    pub time_left: f32,
    pub timer_running: bool,
    second_accumulator: f32,
}

impl Survival {
    pub fn from_config(survival: &SurvivalConfig) -> Self {
        Self {
            fuel: survival.starting_fuel,
            time_left: survival.starting_time,
            timer_running: true,
            second_accumulator: 0.0,
        }
    }

    pub fn add_time(&mut self, seconds: f32) {
        self.time_left += seconds;
    }

    /// Whole-second countdown; returns how many units were consumed.
    fn tick_countdown(&mut self, delta: f32) -> u32 {
        if !self.timer_running {
            return 0;
        }
        self.second_accumulator += delta;
        let mut consumed = 0;
        while self.second_accumulator >= 1.0 {
            self.second_accumulator -= 1.0;
            self.time_left -= 1.0;
            consumed += 1;
        }
        consumed
    }
}

/// Draining scales with horizontal speed up to a cap, so coasting downhill
/// costs as much as flooring it.
fn fuel_drain_amount(horizontal_speed_mps: f32, survival: &SurvivalConfig, delta: f32) -> f32 {
    horizontal_speed_mps.abs().clamp(0.0, survival.fuel_drain_speed_cap)
        * survival.fuel_drain_rate
        * delta
}

pub fn fuel_drain_system(
    mut survival: ResMut<Survival>,
    car_query: Query<&Velocity, With<CarBody>>,
    config: Res<GameConfig>,
    time: Res<Time>,
    game_mode: Res<GameMode>,
) {
    if game_mode.paused {
        return;
    }
    let Ok(velocity) = car_query.single() else { return; };

    let speed_mps = velocity.linvel.x / PIXELS_PER_METER;
    let drain = fuel_drain_amount(speed_mps, &config.survival, time.delta_secs());
    survival.fuel = (survival.fuel - drain).max(0.0);
}

/// Countdown plus the transition into the run-over sequence: slow motion
/// first, full stop and the game-over screen once the delay has passed.
#[derive(Resource)]
pub struct RunOverSequence {
    pub remaining: f32,
}

const RUN_OVER_SLOWDOWN: f32 = 0.1;
const RUN_OVER_DELAY: f32 = 3.0;

pub fn countdown_system(
    mut survival: ResMut<Survival>,
    mut game_mode: ResMut<GameMode>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut commands: Commands,
    time: Res<Time>,
) {
    if game_mode.paused {
        return;
    }

    survival.tick_countdown(time.delta_secs());

    if survival.time_left <= 0.0 && survival.timer_running {
        survival.time_left = 0.0;
        survival.timer_running = false;
        game_mode.run_over = true;
        virtual_time.set_relative_speed(RUN_OVER_SLOWDOWN);
        commands.insert_resource(RunOverSequence { remaining: RUN_OVER_DELAY });
        info!("Run over - time expired");
    }
}

/// Runs on real time so the slow-motion stretch lasts the same three
/// seconds regardless of the virtual clock.
pub fn run_over_sequence_system(
    mut sequence: ResMut<RunOverSequence>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut next_state: ResMut<NextState<GameState>>,
    real_time: Res<Time<Real>>,
    mut commands: Commands,
) {
    sequence.remaining -= real_time.delta_secs();
    if sequence.remaining > 0.0 {
        return;
    }

    virtual_time.pause();
    commands.remove_resource::<RunOverSequence>();
    next_state.set(GameState::GameOver);
}

pub fn pickup_collision_system(
    mut collision_events: EventReader<CollisionEvent>,
    mut survival: ResMut<Survival>,
    mut collected_events: EventWriter<CoinCollectedEvent>,
    mut audio_events: EventWriter<AudioEvent>,
    mut commands: Commands,
    coin_query: Query<(&CoinKind, &Transform), With<Coin>>,
    fuel_query: Query<&Transform, With<FuelCan>>,
    car_query: Query<(), Or<(With<CarBody>, With<CarWheel>)>>,
    config: Res<GameConfig>,
) {
    // Body and wheel can both report the same pickup in one frame.
    let mut handled: HashSet<Entity> = HashSet::new();

    for collision_event in collision_events.read() {
        let CollisionEvent::Started(e1, e2, _) = collision_event else { continue; };

        for (car_part, pickup) in [(*e1, *e2), (*e2, *e1)] {
            if car_query.get(car_part).is_err() || handled.contains(&pickup) {
                continue;
            }

            if let Ok((kind, transform)) = coin_query.get(pickup) {
                handled.insert(pickup);
                survival.add_time(kind.bonus_seconds());
                play_sound(&mut audio_events, AudioType::Coin, 0.6);
                spawn_floating_text(
                    &mut commands,
                    format!("+{}s", kind.bonus_seconds() as u32),
                    transform.translation.truncate(),
                );
                collected_events.write(CoinCollectedEvent { entity: pickup });
            } else if let Ok(transform) = fuel_query.get(pickup) {
                handled.insert(pickup);
                survival.fuel = config.survival.starting_fuel;
                play_sound(&mut audio_events, AudioType::Refuel, 0.7);
                commands
                    .entity(pickup)
                    .insert((FloatAway::new(transform.translation.y), ColliderDisabled))
                    .remove::<FuelCan>();
            }
        }
    }
}

// === PICKUP FLOAT-AWAY ===
#[derive(Component)]
pub struct FloatAway {
    elapsed: f32,
    start_y: f32,
}

const FLOAT_AWAY_DURATION: f32 = 1.0;
const FLOAT_AWAY_RISE: f32 = 300.0;

impl FloatAway {
    pub fn new(start_y: f32) -> Self {
        Self { elapsed: 0.0, start_y }
    }
}

pub fn float_away_system(
    mut query: Query<(Entity, &mut Transform, &mut FloatAway, &mut Sprite), Without<MarkedForDespawn>>,
    mut commands: Commands,
    time: Res<Time>,
    game_mode: Res<GameMode>,
) {
    if game_mode.paused {
        return;
    }

    for (entity, mut transform, mut float_away, mut sprite) in query.iter_mut() {
        float_away.elapsed += time.delta_secs();
        let progress = (float_away.elapsed / FLOAT_AWAY_DURATION).min(1.0);

        transform.translation.y = float_away.start_y + FLOAT_AWAY_RISE * progress;
        sprite.color.set_alpha(1.0 - progress);

        if progress >= 1.0 {
            commands.entity(entity).insert(MarkedForDespawn);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survival_config() -> SurvivalConfig {
        GameConfig::default().survival
    }

    #[test]
    fn countdown_loses_one_unit_per_whole_second() {
        let mut survival = Survival::from_config(&survival_config());
        let start = survival.time_left;

        assert_eq!(survival.tick_countdown(0.4), 0);
        assert_eq!(survival.tick_countdown(0.4), 0);
        assert_eq!(survival.tick_countdown(0.4), 1);
        assert_eq!(survival.time_left, start - 1.0);
    }

    #[test]
    fn countdown_stops_when_timer_not_running() {
        let mut survival = Survival::from_config(&survival_config());
        survival.timer_running = false;
        assert_eq!(survival.tick_countdown(5.0), 0);
        assert_eq!(survival.time_left, survival_config().starting_time);
    }

    #[test]
    fn coin_pickup_adds_variant_seconds() {
        let mut survival = Survival::from_config(&survival_config());
        let start = survival.time_left;
        survival.add_time(CoinKind::Gold.bonus_seconds());
        assert_eq!(survival.time_left, start + 5.0);
    }

    #[test]
    fn fuel_drain_caps_at_configured_speed() {
        let survival = survival_config();
        let capped = fuel_drain_amount(survival.fuel_drain_speed_cap, &survival, 1.0);
        let over = fuel_drain_amount(survival.fuel_drain_speed_cap * 4.0, &survival, 1.0);
        assert_eq!(capped, over);
    }

    #[test]
    fn fuel_drain_scales_with_speed_and_reverses_too() {
        let survival = survival_config();
        let slow = fuel_drain_amount(0.2, &survival, 1.0);
        let fast = fuel_drain_amount(0.6, &survival, 1.0);
        assert!(fast > slow);
        assert_eq!(
            fuel_drain_amount(-0.6, &survival, 1.0),
            fuel_drain_amount(0.6, &survival, 1.0)
        );
    }

    #[test]
    fn stationary_car_drains_nothing() {
        assert_eq!(fuel_drain_amount(0.0, &survival_config(), 1.0), 0.0);
    }
}
