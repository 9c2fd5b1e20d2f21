use bevy::prelude::*;

#[derive(Component)]
pub struct MarkedForDespawn;

pub fn despawn_marked_entities(
    mut commands: Commands,
    query: Query<Entity, With<MarkedForDespawn>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
