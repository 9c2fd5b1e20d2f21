use bevy::prelude::*;

use crate::systems::coin_spawner::CoinKind;

#[derive(Resource)]
pub struct GameSprites {
    pub car_body: Handle<Image>,
    pub wheel: Handle<Image>,
    pub coin: Handle<Image>,
    pub fuel_can: Handle<Image>,
}

pub fn load_sprites(mut commands: Commands, asset_server: Res<AssetServer>) {
    info!("Loading sprites...");

    let sprites = GameSprites {
        car_body: asset_server.load("sprites/car_body.png"),
        wheel: asset_server.load("sprites/wheel.png"),
        coin: asset_server.load("sprites/coin.png"),
        fuel_can: asset_server.load("sprites/fuel_can.png"),
    };

    commands.insert_resource(sprites);
}

pub fn create_car_body_sprite(sprites: &GameSprites) -> Sprite {
    Sprite {
        image: sprites.car_body.clone(),
        custom_size: Some(Vec2::new(220.0, 70.0)),
        color: Color::srgb(0.9, 0.2, 0.2),
        ..default()
    }
}

pub fn create_wheel_sprite(sprites: &GameSprites) -> Sprite {
    Sprite {
        image: sprites.wheel.clone(),
        custom_size: Some(Vec2::splat(70.0)),
        color: Color::srgb(0.15, 0.15, 0.15),
        ..default()
    }
}

pub fn create_coin_sprite(sprites: &GameSprites, kind: CoinKind) -> Sprite {
    let color = match kind {
        CoinKind::Gold => Color::srgb(1.0, 0.85, 0.1),
        CoinKind::Silver => Color::srgb(0.8, 0.8, 0.85),
        CoinKind::Bronze => Color::srgb(0.8, 0.5, 0.2),
        CoinKind::Copper => Color::srgb(0.7, 0.4, 0.25),
    };

    Sprite {
        image: sprites.coin.clone(),
        custom_size: Some(Vec2::splat(40.0)),
        color,
        ..default()
    }
}

pub fn create_fuel_can_sprite(sprites: &GameSprites) -> Sprite {
    Sprite {
        image: sprites.fuel_can.clone(),
        custom_size: Some(Vec2::new(45.0, 60.0)),
        color: Color::srgb(0.9, 0.3, 0.1),
        ..default()
    }
}
