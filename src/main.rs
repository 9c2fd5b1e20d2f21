use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use leafwing_input_manager::prelude::*;

use overdrive::core::*;
use overdrive::systems::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Overdrive".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(PIXELS_PER_METER))
        .add_plugins(InputManagerPlugin::<PlayerAction>::default())
        .init_state::<GameState>()
        .init_resource::<GameMode>()
        .init_resource::<ViewportEdges>()
        .init_resource::<ActiveTrail>()
        .add_event::<AudioEvent>()
        .add_event::<CoinCollectedEvent>()
        .add_systems(Startup, (
            load_game_config,
            setup_camera,
            setup_input,
            setup_audio,
            load_sprites,
            setup_high_score,
        ))
        // Main menu
        .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
        .add_systems(Update, main_menu_system.run_if(in_state(GameState::MainMenu)))
        .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)
        // Driving scene lifecycle
        .add_systems(OnEnter(GameState::Driving), (
            setup_driving_scene,
            setup_coin_pool,
            setup_hud,
        ))
        .add_systems(OnExit(GameState::Driving), cleanup_driving_scene)
        // Core driving loop
        .add_systems(Update, (
            handle_pause_input,
            horn_system,
            car_drive_system,
            car_jump_system,
            engine_audio_system,
            fuel_drain_system,
            countdown_system,
            pickup_collision_system,
            float_away_system,
        ).run_if(in_state(GameState::Driving)))
        // Camera, trail and feedback
        .add_systems(Update, (
            camera_follow_system,
            dynamic_zoom_system,
            viewport_tracking_system,
            trail_emit_system,
            trail_window_system,
            trail_render_system,
            floating_text_system,
            audio_system,
        ).run_if(in_state(GameState::Driving)))
        // Coin pool and spawner
        .add_systems(Update, (
            coin_spawn_system,
            recycle_scan_system,
            coin_collect_system,
        ).run_if(in_state(GameState::Driving)).run_if(resource_exists::<CoinPool>))
        // HUD
        .add_systems(Update, (
            hud_fuel_system,
            low_fuel_warning_system,
            hud_timer_system,
            hud_telemetry_system,
            score_system,
        ).run_if(in_state(GameState::Driving)))
        .add_systems(Update,
            run_over_sequence_system
                .run_if(in_state(GameState::Driving))
                .run_if(resource_exists::<RunOverSequence>),
        )
        // Game over screen
        .add_systems(OnEnter(GameState::GameOver), (persist_high_score, setup_game_over).chain())
        .add_systems(Update, game_over_system.run_if(in_state(GameState::GameOver)))
        .add_systems(OnExit(GameState::GameOver), cleanup_game_over)
        .add_systems(Update, despawn_marked_entities)
        .run();
}
