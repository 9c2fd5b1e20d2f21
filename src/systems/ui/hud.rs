// src/systems/ui/hud.rs - Fuel bar, countdown, telemetry and score readouts
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::*;
use crate::systems::car::CarBody;
use crate::systems::collectibles::Survival;

const MPS_TO_KMH: f32 = 3.6;
const HIGH_VELOCITY_KMH: f32 = 36.0;
const NORMAL_FONT_SIZE: f32 = 24.0;
const HIGH_VELOCITY_FONT_SIZE: f32 = 36.0;
const NORMAL_SCORE_COLOR: Color = Color::WHITE;
const HIGH_VELOCITY_COLOR: Color = Color::srgb(1.0, 0.9, 0.1);

#[derive(Component)]
pub struct FuelBarFill;

#[derive(Component)]
pub struct FuelText;

#[derive(Component)]
pub struct LowFuelWarning;

#[derive(Component)]
pub struct TimerText;

#[derive(Component)]
pub struct SpeedText;

#[derive(Component)]
pub struct DistanceText;

#[derive(Component)]
pub struct ScoreText;

/// Per-run score bookkeeping; distance is displacement from the start.
#[derive(Resource, Default)]
pub struct RunStats {
    pub score: f32,
    start_pos: Option<Vec2>,
    last_pos: Option<Vec2>,
}

impl RunStats {
    /// Score grows by incremental distance (meters) times current speed.
    fn accumulate(&mut self, position: Vec2, speed_mps: f32, pixels_per_meter: f32) {
        let Some(last) = self.last_pos else {
            self.start_pos = Some(position);
            self.last_pos = Some(position);
            return;
        };
        let frame_distance_m = last.distance(position) / pixels_per_meter;
        self.score += frame_distance_m * speed_mps;
        self.last_pos = Some(position);
    }

    fn distance_m(&self, position: Vec2, pixels_per_meter: f32) -> f32 {
        match self.start_pos {
            Some(start) => start.distance(position) / pixels_per_meter,
            None => 0.0,
        }
    }
}

/// Green at full, red when empty, yellow in between.
fn fuel_color(fraction: f32) -> Color {
    let fraction = fraction.clamp(0.0, 1.0);
    if fraction < 0.5 {
        let t = fraction * 2.0;
        Color::srgb(0.9, 0.1 + 0.7 * t, 0.1)
    } else {
        let t = (fraction - 0.5) * 2.0;
        Color::srgb(0.9 - 0.7 * t, 0.8, 0.1)
    }
}

/// Triangle wave bouncing between 0 and `length`, like the flashing warning.
fn ping_pong(t: f32, length: f32) -> f32 {
    let cycle = t % (2.0 * length);
    if cycle < length {
        cycle
    } else {
        2.0 * length - cycle
    }
}

pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            DrivingSceneEntity,
        ))
        .with_children(|parent| {
            // Fuel bar frame, top-left.
            parent
                .spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        top: Val::Px(15.0),
                        left: Val::Px(15.0),
                        width: Val::Px(220.0),
                        height: Val::Px(24.0),
                        padding: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                    BorderRadius::all(Val::Px(4.0)),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(fuel_color(1.0)),
                        BorderRadius::all(Val::Px(3.0)),
                        FuelBarFill,
                    ));
                });

            parent.spawn((
                Text::new("100%"),
                TextFont { font_size: 18.0, ..default() },
                TextColor(fuel_color(1.0)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(17.0),
                    left: Val::Px(245.0),
                    ..default()
                },
                FuelText,
            ));

            parent.spawn((
                Text::new("LOW FUEL"),
                TextFont { font_size: 22.0, ..default() },
                TextColor(Color::srgba(1.0, 0.2, 0.2, 0.0)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(50.0),
                    left: Val::Px(15.0),
                    ..default()
                },
                LowFuelWarning,
            ));

            // Countdown, centered at the top.
            parent.spawn((
                Text::new("10"),
                TextFont { font_size: 48.0, ..default() },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(10.0),
                    left: Val::Percent(48.0),
                    ..default()
                },
                TimerText,
            ));

            parent.spawn((
                Text::new("SCORE: 0"),
                TextFont { font_size: NORMAL_FONT_SIZE, ..default() },
                TextColor(NORMAL_SCORE_COLOR),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(70.0),
                    left: Val::Percent(44.0),
                    ..default()
                },
                ScoreText,
            ));

            // Telemetry, top-right.
            parent.spawn((
                Text::new("0 km/h"),
                TextFont { font_size: 20.0, ..default() },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(15.0),
                    right: Val::Px(15.0),
                    ..default()
                },
                SpeedText,
            ));

            parent.spawn((
                Text::new("0m"),
                TextFont { font_size: 20.0, ..default() },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(42.0),
                    right: Val::Px(15.0),
                    ..default()
                },
                DistanceText,
            ));
        });
}

pub fn hud_fuel_system(
    survival: Res<Survival>,
    config: Res<GameConfig>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<FuelBarFill>>,
    mut text_query: Query<(&mut Text, &mut TextColor), (With<FuelText>, Without<FuelBarFill>)>,
) {
    let fraction = survival.fuel / config.survival.starting_fuel;
    let color = fuel_color(fraction);

    if let Ok((mut node, mut background)) = fill_query.single_mut() {
        node.width = Val::Percent((fraction * 100.0).clamp(0.0, 100.0));
        background.0 = color;
    }
    if let Ok((mut text, mut text_color)) = text_query.single_mut() {
        **text = format!("{:.0}%", survival.fuel);
        text_color.0 = color;
    }
}

pub fn low_fuel_warning_system(
    survival: Res<Survival>,
    config: Res<GameConfig>,
    time: Res<Time>,
    mut warning_query: Query<&mut TextColor, With<LowFuelWarning>>,
) {
    let Ok(mut color) = warning_query.single_mut() else { return; };

    if survival.fuel < config.survival.low_fuel_threshold {
        color.0.set_alpha(ping_pong(time.elapsed_secs(), 0.5) * 2.0);
    } else {
        color.0.set_alpha(0.0);
    }
}

pub fn hud_timer_system(
    survival: Res<Survival>,
    mut timer_query: Query<&mut Text, With<TimerText>>,
) {
    if let Ok(mut text) = timer_query.single_mut() {
        **text = format!("{}", survival.time_left.ceil().max(0.0) as i64);
    }
}

pub fn hud_telemetry_system(
    car_query: Query<(&Transform, &Velocity), With<CarBody>>,
    run_stats: Res<RunStats>,
    mut speed_query: Query<&mut Text, (With<SpeedText>, Without<DistanceText>)>,
    mut distance_query: Query<&mut Text, (With<DistanceText>, Without<SpeedText>)>,
) {
    let Ok((transform, velocity)) = car_query.single() else { return; };

    let speed_kmh = velocity.linvel.length() / PIXELS_PER_METER * MPS_TO_KMH;
    if let Ok(mut text) = speed_query.single_mut() {
        **text = format!("{:.0} km/h", speed_kmh);
    }

    let distance = run_stats.distance_m(transform.translation.truncate(), PIXELS_PER_METER);
    if let Ok(mut text) = distance_query.single_mut() {
        **text = format!("{:.0}m", distance);
    }
}

pub fn score_system(
    mut run_stats: ResMut<RunStats>,
    car_query: Query<(&Transform, &Velocity), With<CarBody>>,
    mut text_query: Query<(&mut Text, &mut TextColor, &mut TextFont), With<ScoreText>>,
    game_mode: Res<GameMode>,
) {
    if game_mode.paused {
        return;
    }
    let Ok((transform, velocity)) = car_query.single() else { return; };

    let speed_mps = velocity.linvel.length() / PIXELS_PER_METER;
    run_stats.accumulate(transform.translation.truncate(), speed_mps, PIXELS_PER_METER);

    let Ok((mut text, mut color, mut font)) = text_query.single_mut() else { return; };
    **text = format!("SCORE: {}", run_stats.score.round() as i64);

    if speed_mps * MPS_TO_KMH > HIGH_VELOCITY_KMH {
        color.0 = HIGH_VELOCITY_COLOR;
        font.font_size = HIGH_VELOCITY_FONT_SIZE;
    } else {
        color.0 = NORMAL_SCORE_COLOR;
        font.font_size = NORMAL_FONT_SIZE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_accumulates_with_movement() {
        let mut stats = RunStats::default();
        stats.accumulate(Vec2::ZERO, 10.0, 100.0);
        assert_eq!(stats.score, 0.0);

        stats.accumulate(Vec2::new(100.0, 0.0), 10.0, 100.0);
        assert_eq!(stats.score, 10.0);

        // Standing still adds nothing.
        stats.accumulate(Vec2::new(100.0, 0.0), 10.0, 100.0);
        assert_eq!(stats.score, 10.0);
    }

    #[test]
    fn score_is_monotonic_while_moving() {
        let mut stats = RunStats::default();
        let mut previous = 0.0;
        for i in 0..50 {
            stats.accumulate(Vec2::new(i as f32 * 20.0, 0.0), 5.0, 100.0);
            assert!(stats.score >= previous);
            previous = stats.score;
        }
    }

    #[test]
    fn distance_measures_displacement_from_start() {
        let mut stats = RunStats::default();
        stats.accumulate(Vec2::new(50.0, 0.0), 1.0, 100.0);
        assert_eq!(stats.distance_m(Vec2::new(250.0, 0.0), 100.0), 2.0);
    }

    #[test]
    fn fuel_color_ramps_from_green_to_red() {
        let full = fuel_color(1.0).to_srgba();
        let empty = fuel_color(0.0).to_srgba();
        assert!(full.green > full.red);
        assert!(empty.red > empty.green);
    }

    #[test]
    fn ping_pong_bounces_between_bounds() {
        assert_eq!(ping_pong(0.0, 0.5), 0.0);
        assert_eq!(ping_pong(0.5, 0.5), 0.5);
        assert!((ping_pong(0.75, 0.5) - 0.25).abs() < f32::EPSILON);
        assert!(ping_pong(123.4, 0.5) >= 0.0 && ping_pong(123.4, 0.5) <= 0.5);
    }
}
