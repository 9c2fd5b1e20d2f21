// src/core/config.rs - Game configuration and balancing
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::systems::coin_spawner::CoinKind;

#[derive(Resource, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    pub car: CarConfig,
    pub survival: SurvivalConfig,
    pub coins: CoinConfig,
    pub camera: CameraConfig,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct CarConfig {
    pub drive_torque: f32,
    pub rotation_torque: f32,
    pub jump_impulse: f32,
    pub jump_cooldown: f32,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct SurvivalConfig {
    pub starting_fuel: f32,
    pub starting_time: f32,
    pub fuel_drain_rate: f32,
    /// Horizontal speed (m/s) past which draining stops scaling.
    pub fuel_drain_speed_cap: f32,
    pub low_fuel_threshold: f32,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct CoinConfig {
    pub max_on_screen: usize,
    pub min_spawn_interval: f32,
    pub max_spawn_interval: f32,
    pub spawn_distance_right: f32,
    pub despawn_distance_left: f32,
    pub vertical_range: f32,
    pub variants: Vec<CoinKind>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct CameraConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Speed (m/s) at which zoom reaches max_zoom.
    pub zoom_max_speed: f32,
    pub zoom_rate: f32,
    pub follow_rate: f32,
}

impl GameConfig {
    pub fn load() -> Self {
        match std::fs::read_to_string("data/config/game.json") {
            Ok(content) => {
                serde_json::from_str(&content)
                    .map_err(|e| error!("Failed to parse game config: {}", e))
                    .unwrap_or_else(|_| Self::default())
            },
            Err(e) => {
                error!("Failed to load game config: {}", e);
                Self::default()
            }
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            car: CarConfig {
                drive_torque: 60_000_000.0,
                rotation_torque: 40_000_000.0,
                jump_impulse: 8_000_000.0,
                jump_cooldown: 1.5,
            },
            survival: SurvivalConfig {
                starting_fuel: 100.0,
                starting_time: 10.0,
                fuel_drain_rate: 5.0,
                fuel_drain_speed_cap: 0.8,
                low_fuel_threshold: 20.0,
            },
            coins: CoinConfig {
                max_on_screen: 25,
                min_spawn_interval: 0.5,
                max_spawn_interval: 1.5,
                spawn_distance_right: 1200.0,
                despawn_distance_left: 800.0,
                vertical_range: 260.0,
                variants: vec![
                    CoinKind::Copper,
                    CoinKind::Copper,
                    CoinKind::Bronze,
                    CoinKind::Bronze,
                    CoinKind::Silver,
                    CoinKind::Silver,
                    CoinKind::Gold,
                ],
            },
            camera: CameraConfig {
                min_zoom: 0.9,
                max_zoom: 2.0,
                zoom_max_speed: 20.0,
                zoom_rate: 3.0,
                follow_rate: 5.0,
            },
        }
    }
}

pub fn load_game_config(mut commands: Commands) {
    let config = GameConfig::load();
    if config.coins.min_spawn_interval > config.coins.max_spawn_interval {
        error!("Coin config has min_spawn_interval > max_spawn_interval, using defaults");
        commands.insert_resource(GameConfig::default());
        return;
    }
    commands.insert_resource(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_intervals_are_ordered() {
        let config = GameConfig::default();
        assert!(config.coins.min_spawn_interval <= config.coins.max_spawn_interval);
        assert!(config.coins.min_spawn_interval >= 0.0);
    }

    #[test]
    fn default_config_offsets_are_non_negative() {
        let config = GameConfig::default();
        assert!(config.coins.spawn_distance_right >= 0.0);
        assert!(config.coins.despawn_distance_left >= 0.0);
        assert!(config.coins.vertical_range >= 0.0);
    }

    #[test]
    fn default_config_has_coin_variants() {
        assert!(!GameConfig::default().coins.variants.is_empty());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.coins.max_on_screen, config.coins.max_on_screen);
        assert_eq!(back.coins.variants.len(), config.coins.variants.len());
    }
}
