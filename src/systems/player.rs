use bevy_ecs::{
    query::With,
    system::{Query, Res},
};
use glam::Vec2;

use crate::constants::mechanics::PLAYER_SPEED;
use crate::systems::components::{PlayerControlled, Velocity};
use crate::systems::input::{Bindings, HeldKeys, KeyboardState};

/// Maps held directions straight to a velocity.
///
/// Each axis is resolved on its own: left is checked before right and up before
/// down, so opposing keys resolve to left/up. Diagonals are not normalized and
/// move √2 times faster than straight lines.
pub fn player_velocity(keys: HeldKeys) -> Vec2 {
    let mut velocity = Vec2::ZERO;

    if keys.contains(HeldKeys::LEFT) {
        velocity.x = -PLAYER_SPEED;
    } else if keys.contains(HeldKeys::RIGHT) {
        velocity.x = PLAYER_SPEED;
    }

    if keys.contains(HeldKeys::UP) {
        velocity.y = -PLAYER_SPEED;
    } else if keys.contains(HeldKeys::DOWN) {
        velocity.y = PLAYER_SPEED;
    }

    velocity
}

/// Sets the player's velocity from the keyboard every frame.
pub fn player_input_system(
    bindings: Res<Bindings>,
    keyboard: Res<KeyboardState>,
    mut players: Query<&mut Velocity, With<PlayerControlled>>,
) {
    let held = keyboard.held(&bindings);
    for mut velocity in players.iter_mut() {
        velocity.0 = player_velocity(held);
    }
}
