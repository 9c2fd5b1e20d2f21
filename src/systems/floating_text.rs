// src/systems/floating_text.rs - World-space pickup feedback text
use bevy::prelude::*;

use crate::core::*;

#[derive(Component)]
pub struct FloatingText {
    pub lifetime: f32,
    pub velocity: Vec2,
}

const TEXT_Z: f32 = 100.0;
const TEXT_LIFETIME: f32 = 1.5;

pub fn spawn_floating_text(commands: &mut Commands, text: String, position: Vec2) {
    commands.spawn((
        Text2d::new(text),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.9, 0.2)),
        Transform::from_translation((position + Vec2::new(0.0, 30.0)).extend(TEXT_Z)),
        FloatingText {
            lifetime: TEXT_LIFETIME,
            velocity: Vec2::new((rand::random::<f32>() - 0.5) * 20.0, 80.0),
        },
        DrivingSceneEntity,
    ));
}

pub fn floating_text_system(
    mut text_query: Query<(Entity, &mut Transform, &mut FloatingText, &mut TextColor), Without<MarkedForDespawn>>,
    mut commands: Commands,
    time: Res<Time>,
    game_mode: Res<GameMode>,
) {
    if game_mode.paused {
        return;
    }

    for (entity, mut transform, mut floating_text, mut text_color) in text_query.iter_mut() {
        floating_text.lifetime -= time.delta_secs();

        if floating_text.lifetime <= 0.0 {
            commands.entity(entity).insert(MarkedForDespawn);
        } else {
            transform.translation += floating_text.velocity.extend(0.0) * time.delta_secs();
            floating_text.velocity.y *= 0.95;
            text_color.0.set_alpha(floating_text.lifetime / TEXT_LIFETIME);
        }
    }
}
