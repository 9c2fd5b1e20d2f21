// src/systems/save.rs - High-score persistence
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::systems::ui::hud::RunStats;

const SAVE_FILE: &str = "overdrive_save.json";

#[derive(Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub high_score: f32,
}

#[derive(Resource, Default)]
pub struct HighScore(pub f32);

pub fn save_exists() -> bool {
    std::path::Path::new(SAVE_FILE).exists()
}

pub fn load_high_score() -> Option<f32> {
    let content = fs::read_to_string(SAVE_FILE).ok()?;
    match serde_json::from_str::<SaveData>(&content) {
        Ok(data) => Some(data.high_score),
        Err(e) => {
            warn!("Failed to parse save file: {}", e);
            None
        }
    }
}

pub fn save_high_score(high_score: f32) {
    let data = SaveData { high_score };
    match serde_json::to_string_pretty(&data) {
        Ok(json) => {
            if let Err(e) = fs::write(SAVE_FILE, json) {
                error!("Failed to write save file: {}", e);
            }
        }
        Err(e) => error!("Failed to serialize save data: {}", e),
    }
}

pub fn setup_high_score(mut commands: Commands) {
    let high_score = load_high_score().unwrap_or(0.0);
    if high_score > 0.0 {
        info!("Loaded high score: {:.0}", high_score);
    }
    commands.insert_resource(HighScore(high_score));
}

/// Runs once when the run ends; the record only touches disk here.
pub fn persist_high_score(mut high_score: ResMut<HighScore>, run_stats: Res<RunStats>) {
    if run_stats.score > high_score.0 {
        high_score.0 = run_stats.score;
        save_high_score(high_score.0);
        info!("New high score: {:.0}", high_score.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_data_round_trips_through_json() {
        let data = SaveData { high_score: 1234.5 };
        let json = serde_json::to_string(&data).unwrap();
        let back: SaveData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.high_score, 1234.5);
    }

    #[test]
    fn malformed_save_yields_none() {
        assert!(serde_json::from_str::<SaveData>("not json").is_err());
    }
}
