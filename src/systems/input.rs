// src/systems/input.rs - Pause toggle and horn
use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::core::*;

pub fn handle_pause_input(
    action_query: Query<&ActionState<PlayerAction>>,
    mut game_mode: ResMut<GameMode>,
    mut virtual_time: ResMut<Time<Virtual>>,
) {
    let Ok(action_state) = action_query.single() else { return; };
    if !action_state.just_pressed(&PlayerAction::Pause) {
        return;
    }

    // Once the countdown has expired the run is over; no pausing out of it.
    if game_mode.run_over {
        return;
    }

    game_mode.paused = !game_mode.paused;
    if game_mode.paused {
        virtual_time.pause();
    } else {
        virtual_time.unpause();
    }
    info!("Game {}", if game_mode.paused { "paused" } else { "resumed" });
}

pub fn horn_system(
    action_query: Query<&ActionState<PlayerAction>>,
    mut audio_events: EventWriter<AudioEvent>,
    game_mode: Res<GameMode>,
) {
    if game_mode.paused {
        return;
    }
    let Ok(action_state) = action_query.single() else { return; };

    if action_state.just_pressed(&PlayerAction::Horn) {
        play_sound(&mut audio_events, AudioType::Horn, 0.8);
    }
}
