use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventReader, EventWriter};
use bevy_ecs::query::{Or, With, Without};
use bevy_ecs::system::{Commands, Query, ResMut};
use tracing::trace;

use crate::events::GameEvent;
use crate::systems::components::{Body, DotsCollected, EnergyDot, PlayerControlled, Position};
use crate::systems::enemy::Enemy;
use crate::systems::physics::Aabb;

/// Detects the player overlapping enemies and energy dots.
///
/// Every overlap produces a `GameEvent::Collision(player, other)`; the systems
/// handling dots and enemies decide what it means.
pub fn collision_system(
    player_query: Query<(Entity, &Position, &Body), With<PlayerControlled>>,
    others: Query<(Entity, &Position, &Body), (Or<(With<Enemy>, With<EnergyDot>)>, Without<PlayerControlled>)>,
    mut events: EventWriter<GameEvent>,
) {
    for (player, player_pos, player_body) in player_query.iter() {
        let player_box = Aabb::from_center(player_pos.0, player_body.size);

        for (other, pos, body) in others.iter() {
            if player_box.overlaps(&Aabb::from_center(pos.0, body.size)) {
                events.write(GameEvent::Collision(player, other));
            }
        }
    }
}

/// Removes energy dots the player has touched.
pub fn dot_collection_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    dots: Query<(), With<EnergyDot>>,
    mut collected: ResMut<DotsCollected>,
) {
    for event in events.read() {
        let GameEvent::Collision(_, other) = *event else {
            continue;
        };

        if dots.contains(other) {
            collected.0 += 1;
            trace!(dot = ?other, total = collected.0, "Energy dot collected");
            commands.entity(other).despawn();
        }
    }
}
