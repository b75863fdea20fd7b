//! Maze layouts: the list of wall rectangles a level is made of.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAZE;
use crate::error::LevelError;

/// An axis-aligned wall, anchored at its top-left corner, in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WallRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn max(&self) -> Vec2 {
        self.min() + self.size()
    }
}

impl From<[f32; 4]> for WallRect {
    fn from([x, y, width, height]: [f32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

/// The on-disk level format: `{ "maze": [[x, y, width, height], ...] }`.
#[derive(Debug, Serialize, Deserialize)]
struct LevelFile {
    maze: Vec<Vec<f32>>,
}

/// An ordered sequence of wall rectangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MazeLayout {
    walls: Vec<WallRect>,
}

impl MazeLayout {
    pub fn new(walls: Vec<WallRect>) -> Self {
        Self { walls }
    }

    /// A layout with no walls at all, substituted when a level cannot be loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The maze the game ships with.
    pub fn builtin() -> Self {
        Self::new(DEFAULT_MAZE.iter().copied().map(WallRect::from).collect())
    }

    pub fn walls(&self) -> &[WallRect] {
        &self.walls
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Parses a level document.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Json`] for malformed JSON or a missing `maze` field,
    /// [`LevelError::WrongArity`] for entries that are not `[x, y, width, height]`, and
    /// [`LevelError::InvalidSize`] for walls without a positive width and height.
    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let level: LevelFile = serde_json::from_str(text)?;

        let walls = level
            .maze
            .into_iter()
            .enumerate()
            .map(|(index, values)| {
                let [x, y, width, height]: [f32; 4] = values
                    .as_slice()
                    .try_into()
                    .map_err(|_| LevelError::WrongArity {
                        index,
                        found: values.len(),
                    })?;

                if width <= 0.0 || height <= 0.0 {
                    return Err(LevelError::InvalidSize { index, width, height });
                }

                Ok(WallRect::new(x, y, width, height))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(walls))
    }

    /// Serializes the layout back into the level document format.
    pub fn to_json(&self) -> Result<String, LevelError> {
        let level = LevelFile {
            maze: self.walls.iter().map(|w| vec![w.x, w.y, w.width, w.height]).collect(),
        };
        Ok(serde_json::to_string_pretty(&level)?)
    }
}
