use bevy_ecs::{
    component::Component,
    query::{With, Without},
    system::{Query, ResMut},
};
use glam::Vec2;
use rand::Rng;
use strum_macros::{Display, EnumIter};
use tracing::trace;

use crate::asset::Asset;
use crate::constants::mechanics::HUNT_RADIUS;
use crate::systems::animation::AnimationKey;
use crate::systems::components::{GameRng, PlayerControlled, Position, Velocity};

/// The kinds of enemy roaming the maze. Each kind has a fixed speed and look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum EnemyKind {
    /// Wanders forever and never hunts.
    Drifter,
    Gator,
    Lion,
    Copter,
}

/// How an enemy picks a new heading once it has come to a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WanderRule {
    /// Reroll both axes, only when the enemy is fully stopped.
    WhenStopped,
    /// Reroll each axis on its own as soon as it reaches zero.
    PerAxis,
}

impl EnemyKind {
    /// The kinds picked from when no pool is configured.
    pub const HUNTERS: [EnemyKind; 3] = [EnemyKind::Gator, EnemyKind::Lion, EnemyKind::Copter];

    /// Movement speed, in pixels per second.
    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Drifter | EnemyKind::Gator => 100.0,
            EnemyKind::Lion => 200.0,
            EnemyKind::Copter => 300.0,
        }
    }

    pub fn sheet(self) -> Asset {
        match self {
            EnemyKind::Drifter => Asset::Drifter,
            EnemyKind::Gator => Asset::Gator,
            EnemyKind::Lion => Asset::Lion,
            EnemyKind::Copter => Asset::Copter,
        }
    }

    pub fn animation(self) -> AnimationKey {
        match self {
            EnemyKind::Drifter => AnimationKey::Drift,
            EnemyKind::Gator => AnimationKey::Snap,
            EnemyKind::Lion => AnimationKey::Roar,
            EnemyKind::Copter => AnimationKey::Chopper,
        }
    }

    /// Whether this kind chases a nearby player.
    pub fn hunts(self) -> bool {
        !matches!(self, EnemyKind::Drifter)
    }

    pub fn wander_rule(self) -> WanderRule {
        match self {
            EnemyKind::Drifter => WanderRule::PerAxis,
            _ => WanderRule::WhenStopped,
        }
    }
}

/// An enemy entity, tagged with its kind.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy(pub EnemyKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyBehavior {
    Wander,
    Pursue,
}

/// A uniformly random whole-pixel speed in `[-speed, speed]`.
pub fn random_axis_speed<R: Rng>(rng: &mut R, speed: f32) -> f32 {
    let limit = speed as i32;
    rng.random_range(-limit..=limit) as f32
}

/// A random heading with each axis in `[-speed, speed]`.
pub fn random_velocity<R: Rng>(rng: &mut R, speed: f32) -> Vec2 {
    let x = random_axis_speed(rng, speed);
    let y = random_axis_speed(rng, speed);
    Vec2::new(x, y)
}

/// Decides an enemy's velocity for the next frame.
///
/// Hunting kinds within [`HUNT_RADIUS`] (inclusive) of the player head straight for it
/// at full speed. Otherwise the current velocity is kept, unless the enemy has stopped,
/// in which case a random heading is rolled according to its [`WanderRule`].
pub fn next_velocity<R: Rng>(
    kind: EnemyKind,
    enemy: Vec2,
    player: Option<Vec2>,
    velocity: Vec2,
    rng: &mut R,
) -> (EnemyBehavior, Vec2) {
    let speed = kind.speed();

    if let Some(player) = player.filter(|p| kind.hunts() && enemy.distance(*p) <= HUNT_RADIUS) {
        let offset = player - enemy;
        let angle = offset.y.atan2(offset.x);
        return (EnemyBehavior::Pursue, Vec2::from_angle(angle) * speed);
    }

    let velocity = match kind.wander_rule() {
        WanderRule::WhenStopped if velocity == Vec2::ZERO => random_velocity(rng, speed),
        WanderRule::WhenStopped => velocity,
        WanderRule::PerAxis => Vec2::new(
            if velocity.x == 0.0 { random_axis_speed(rng, speed) } else { velocity.x },
            if velocity.y == 0.0 { random_axis_speed(rng, speed) } else { velocity.y },
        ),
    };

    (EnemyBehavior::Wander, velocity)
}

/// Re-evaluates every enemy's heading once per frame.
pub fn enemy_behavior_system(
    mut rng: ResMut<GameRng>,
    player: Query<&Position, (With<PlayerControlled>, Without<Enemy>)>,
    mut enemies: Query<(&Enemy, &Position, &mut Velocity), Without<PlayerControlled>>,
) {
    let player_position = player.single().ok().map(|p| p.0);

    for (enemy, position, mut velocity) in enemies.iter_mut() {
        let (behavior, next) = next_velocity(enemy.0, position.0, player_position, velocity.0, &mut rng.0);
        if next != velocity.0 {
            trace!(kind = %enemy.0, ?behavior, from = ?velocity.0, to = ?next, "Enemy changed heading");
            velocity.0 = next;
        }
    }
}
