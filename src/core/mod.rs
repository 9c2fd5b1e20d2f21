// src/core/mod.rs - Shared states, input actions and run-wide resources
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

pub mod audio;
pub mod collision_groups;
pub mod config;
pub mod despawn;
pub mod sprites;

pub use audio::*;
pub use collision_groups::*;
pub use config::*;
pub use despawn::*;
pub use sprites::*;

/// World-to-physics scale handed to the rapier plugin. Velocities come back
/// in pixels per second, so gameplay math divides by this to get m/s.
pub const PIXELS_PER_METER: f32 = 100.0;

// === INPUT ===
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
#[reflect(Hash, PartialEq)]
pub enum PlayerAction {
    Accelerate,
    Reverse,
    Jump,
    Horn,
    Pause,
}

pub fn setup_input(mut commands: Commands) {
    let input_map = InputMap::default()
        .with(PlayerAction::Accelerate, KeyCode::ArrowRight)
        .with(PlayerAction::Accelerate, KeyCode::KeyD)
        .with(PlayerAction::Reverse, KeyCode::ArrowLeft)
        .with(PlayerAction::Reverse, KeyCode::KeyA)
        .with(PlayerAction::Jump, KeyCode::Space)
        .with(PlayerAction::Horn, KeyCode::KeyH)
        .with(PlayerAction::Pause, KeyCode::Escape);

    commands.spawn(InputManagerBundle::with_map(input_map));
}

// === STATES ===
#[derive(States, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    MainMenu,
    Driving,
    GameOver,
}

impl Default for GameState {
    fn default() -> Self { GameState::MainMenu }
}

// === RUN MODE ===
#[derive(Resource, Default)]
pub struct GameMode {
    pub paused: bool,
    /// Set once the countdown hits zero; pause input stops responding.
    pub run_over: bool,
}

/// Marker for every entity that belongs to the driving scene and gets torn
/// down on `OnExit(GameState::Driving)`.
#[derive(Component)]
pub struct DrivingSceneEntity;
