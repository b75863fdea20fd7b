//! Centralized error types for the game.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use std::io;

use bevy_ecs::event::Event;

use crate::asset::Asset;
use crate::systems::animation::AnimationKey;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
/// It can represent any error that can occur during game operation.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("Texture '{0}' has not been loaded")]
    MissingTexture(Asset),

    #[error("Failed to load {asset} from {path}: {reason}")]
    LoadFailed { asset: Asset, path: String, reason: String },
}

/// Errors raised while defining or looking up animations.
#[derive(thiserror::Error, Debug)]
pub enum AnimationError {
    #[error("Animation '{0}' is not defined")]
    MissingAnimation(AnimationKey),

    #[error("Animation '{key}' needs sprite sheet '{sheet}', which has not been loaded")]
    MissingSheet { key: AnimationKey, sheet: Asset },

    #[error("Animation '{key}' has an empty frame range {first}..={last}")]
    EmptyRange { key: AnimationKey, first: u16, last: u16 },

    #[error("Animation '{key}' ends on frame {last}, but its sheet only has {available} frames")]
    FrameOutOfRange { key: AnimationKey, last: u16, available: u32 },
}

/// Errors related to level files.
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    #[error("Failed to read level file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse level file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Wall {index} must have 4 values [x, y, width, height], found {found}")]
    WrongArity { index: usize, found: usize },

    #[error("Wall {index} has a non-positive size ({width}x{height})")]
    InvalidSize { index: usize, width: f32, height: f32 },

    #[error("Level loader stopped before delivering a level")]
    Disconnected,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
