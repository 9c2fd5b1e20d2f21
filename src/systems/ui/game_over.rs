// src/systems/ui/game_over.rs - End-of-run screen with score and restart
use bevy::prelude::*;

use crate::core::*;
use crate::systems::save::HighScore;
use crate::systems::ui::hud::RunStats;

const BUTTON_COLOR: Color = Color::srgba(0.2, 0.2, 0.4, 0.8);
const BUTTON_HOVER_COLOR: Color = Color::srgba(0.3, 0.3, 0.5, 0.8);

#[derive(Component)]
pub struct GameOverUI;

#[derive(Component)]
pub struct RestartButton;

#[derive(Component)]
pub struct ExitButton;

fn create_text(text: &str, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont { font_size: size, ..default() },
        TextColor(color),
    )
}

pub fn setup_game_over(
    mut commands: Commands,
    run_stats: Res<RunStats>,
    high_score: Res<HighScore>,
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.02, 0.02, 0.92)),
            GameOverUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                create_text("GAME OVER", 56.0, Color::srgb(1.0, 0.25, 0.2)),
                Node { margin: UiRect::bottom(Val::Px(30.0)), ..default() },
            ));
            parent.spawn(create_text(
                &format!("Score: {}", run_stats.score.round() as i64),
                28.0,
                Color::WHITE,
            ));
            parent.spawn((
                create_text(
                    &format!("Highscore: {}", high_score.0.round() as i64),
                    22.0,
                    Color::srgb(1.0, 0.85, 0.1),
                ),
                Node { margin: UiRect::bottom(Val::Px(40.0)), ..default() },
            ));

            parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Px(220.0),
                        height: Val::Px(50.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        margin: UiRect::top(Val::Px(12.0)),
                        ..default()
                    },
                    BackgroundColor(BUTTON_COLOR),
                    BorderRadius::all(Val::Px(4.0)),
                    RestartButton,
                ))
                .with_children(|button| {
                    button.spawn(create_text("Restart (Enter)", 20.0, Color::WHITE));
                });

            parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Px(220.0),
                        height: Val::Px(50.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        margin: UiRect::top(Val::Px(12.0)),
                        ..default()
                    },
                    BackgroundColor(BUTTON_COLOR),
                    BorderRadius::all(Val::Px(4.0)),
                    ExitButton,
                ))
                .with_children(|button| {
                    button.spawn(create_text("Quit (Esc)", 20.0, Color::WHITE));
                });
        });
}

pub fn game_over_system(
    mut next_state: ResMut<NextState<GameState>>,
    mut app_exit: EventWriter<AppExit>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut restart_query: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<RestartButton>, Without<ExitButton>)>,
    mut exit_query: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<ExitButton>, Without<RestartButton>)>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        next_state.set(GameState::Driving);
        return;
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        app_exit.write(AppExit::Success);
        return;
    }

    for (interaction, mut background) in restart_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => next_state.set(GameState::Driving),
            Interaction::Hovered => background.0 = BUTTON_HOVER_COLOR,
            Interaction::None => background.0 = BUTTON_COLOR,
        }
    }

    for (interaction, mut background) in exit_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                app_exit.write(AppExit::Success);
            }
            Interaction::Hovered => background.0 = BUTTON_HOVER_COLOR,
            Interaction::None => background.0 = BUTTON_COLOR,
        }
    }
}

pub fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverUI>>) {
    for entity in query.iter() {
        commands.entity(entity).insert(MarkedForDespawn);
    }
}
