// src/systems/ui/main_menu.rs - Title screen
use bevy::prelude::*;

use crate::core::*;

const BUTTON_COLOR: Color = Color::srgba(0.2, 0.2, 0.4, 0.8);
const BUTTON_HOVER_COLOR: Color = Color::srgba(0.3, 0.3, 0.5, 0.8);

#[derive(Component)]
pub struct MainMenuUI;

#[derive(Component)]
pub struct PlayButton;

#[derive(Component)]
pub struct QuitButton;

fn create_text(text: &str, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont { font_size: size, ..default() },
        TextColor(color),
    )
}

fn create_button(label: &'static str) -> (impl Bundle, &'static str) {
    (
        (
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
        ),
        label,
    )
}

pub fn setup_main_menu(mut commands: Commands) {
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
            BackgroundColor(Color::srgba(0.08, 0.08, 0.15, 1.0)),
            MainMenuUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                create_text("OVERDRIVE", 64.0, Color::srgb(1.0, 0.85, 0.1)),
                Node { margin: UiRect::bottom(Val::Px(10.0)), ..default() },
            ));
            parent.spawn((
                create_text("Keep the clock alive. Grab coins. Don't run dry.", 18.0, Color::srgb(0.7, 0.7, 0.8)),
                Node { margin: UiRect::bottom(Val::Px(40.0)), ..default() },
            ));

            let (play_bundle, play_label) = create_button("Play (Enter)");
            parent.spawn((play_bundle, PlayButton)).with_children(|button| {
                button.spawn(create_text(play_label, 20.0, Color::WHITE));
            });

            let (quit_bundle, quit_label) = create_button("Quit (Esc)");
            parent.spawn((quit_bundle, QuitButton)).with_children(|button| {
                button.spawn(create_text(quit_label, 20.0, Color::WHITE));
            });
        });
}

pub fn main_menu_system(
    mut next_state: ResMut<NextState<GameState>>,
    mut app_exit: EventWriter<AppExit>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut play_query: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<PlayButton>, Without<QuitButton>)>,
    mut quit_query: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<QuitButton>, Without<PlayButton>)>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        next_state.set(GameState::Driving);
        return;
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        app_exit.write(AppExit::Success);
        return;
    }

    for (interaction, mut background) in play_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => next_state.set(GameState::Driving),
            Interaction::Hovered => background.0 = BUTTON_HOVER_COLOR,
            Interaction::None => background.0 = BUTTON_COLOR,
        }
    }

    for (interaction, mut background) in quit_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                app_exit.write(AppExit::Success);
            }
            Interaction::Hovered => background.0 = BUTTON_HOVER_COLOR,
            Interaction::None => background.0 = BUTTON_COLOR,
        }
    }
}

pub fn cleanup_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuUI>>) {
    for entity in query.iter() {
        commands.entity(entity).insert(MarkedForDespawn);
    }
}
