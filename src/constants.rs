//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::UVec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the playfield (and the window), in pixels.
pub const WORLD_SIZE: UVec2 = UVec2::new(1025, 775);

/// The edge length of a single wall brick, in pixels.
pub const BRICK_SIZE: f32 = 25.0;

/// Game mechanics constants
pub mod mechanics {
    /// Speed applied to each held axis of the player, in pixels per second.
    pub const PLAYER_SPEED: f32 = 200.0;
    /// Enemies closer than this (inclusive) hunt the player, in pixels.
    pub const HUNT_RADIUS: f32 = 300.0;
    /// How many enemies are spawned at scene start.
    pub const ENEMY_COUNT: usize = 5;
    /// Pause between the end of the death animation and the scene restart.
    pub const RESTART_DELAY: f32 = 2.0;
}

/// Spawn placement constants
pub mod spawn {
    use glam::{IVec2, Vec2};

    /// The player's spawn point (center).
    pub const PLAYER_START: Vec2 = Vec2::new(120.0, 120.0);
    /// Inclusive lower corner of the enemy spawn region.
    pub const ENEMY_MIN: IVec2 = IVec2::new(100, 100);
    /// Inclusive upper corner of the enemy spawn region.
    pub const ENEMY_MAX: IVec2 = IVec2::new(924, 668);
}

/// Energy dot grid constants
pub mod dots {
    /// Distance between neighbouring dots.
    pub const SPACING: f32 = 50.0;
    /// Empty border between the playfield edge and the first/last dot.
    pub const MARGIN: f32 = 100.0;
    /// Display (and overlap) size of a dot.
    pub const SIZE: f32 = 15.0;
}

/// Display sizes, which also act as the physics body sizes.
pub mod display {
    use glam::Vec2;

    pub const PLAYER: Vec2 = Vec2::splat(64.0);
    pub const ENEMY: Vec2 = Vec2::splat(72.0);
}

/// Animation timing constants
pub mod animation {
    /// Frames per second used by every sprite animation in the game.
    pub const FRAME_RATE: f32 = 10.0;
    /// Extra plays of the death animation after the first one.
    pub const DEATH_REPEATS: u32 = 2;
}

/// The built-in maze, used when no level file is supplied.
///
/// Each entry is `[x, y, width, height]` in world pixels.
pub const DEFAULT_MAZE: [[f32; 4]; 11] = [
    [50.0, 50.0, 924.0, 20.0],   // top
    [50.0, 50.0, 20.0, 668.0],   // left
    [954.0, 50.0, 20.0, 668.0],  // right
    [50.0, 698.0, 924.0, 20.0],  // bottom
    [200.0, 150.0, 20.0, 300.0], // inner walls
    [300.0, 150.0, 300.0, 20.0],
    [600.0, 150.0, 20.0, 400.0],
    [200.0, 450.0, 300.0, 20.0],
    [500.0, 350.0, 20.0, 250.0],
    [750.0, 350.0, 150.0, 20.0],
    [750.0, 500.0, 20.0, 150.0],
];
