use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::asset::Asset;
use crate::systems::animation::AnimationPlayer;
use crate::systems::enemy::Enemy;

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct PlayerControlled;

/// A tag component for wall bricks.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct Wall;

/// A tag component for collectible energy dots.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct EnergyDot;

/// Marks everything created by a scene start, so a restart can tear the scene down.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct SceneMember;

/// Center of an entity in world pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Velocity in pixels per second.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

/// An axis-aligned physics body, centered on the entity's [`Position`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub size: Vec2,
    /// Fraction of velocity kept (and reversed) after hitting a wall or the world edge.
    pub bounce: f32,
    pub collide_world_bounds: bool,
}

impl Body {
    /// A body that never moves on its own.
    pub fn fixed(size: Vec2) -> Self {
        Self {
            size,
            bounce: 0.0,
            collide_world_bounds: false,
        }
    }
}

/// A component for entities drawn with a texture at a fixed display size.
///
/// Animated entities take their sprite sheet from [`AnimationPlayer`] instead of `asset`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    pub asset: Asset,
    pub size: Vec2,
    pub layer: u8,
}

#[derive(Bundle)]
pub struct WallBundle {
    pub wall: Wall,
    pub position: Position,
    pub body: Body,
    pub sprite: Renderable,
    pub scene: SceneMember,
}

#[derive(Bundle)]
pub struct DotBundle {
    pub dot: EnergyDot,
    pub position: Position,
    pub body: Body,
    pub sprite: Renderable,
    pub scene: SceneMember,
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
    pub body: Body,
    pub sprite: Renderable,
    pub animation: AnimationPlayer,
    pub scene: SceneMember,
}

#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub position: Position,
    pub velocity: Velocity,
    pub body: Body,
    pub sprite: Renderable,
    pub animation: AnimationPlayer,
    pub scene: SceneMember,
}

#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct DeltaTime(pub f32);

/// Number of energy dots the player has picked up this scene.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DotsCollected(pub u32);

/// The game's single source of randomness.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(SmallRng::from_rng(&mut rand::rng()))
    }
}
