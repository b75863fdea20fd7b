//! Turns maze layouts into brick cells and lays out the energy dot grid.

use glam::{UVec2, Vec2};

use crate::map::layout::{MazeLayout, WallRect};

/// A single square wall cell. Bricks are the unit of both rendering and collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brick {
    pub center: Vec2,
    pub size: f32,
}

impl Brick {
    pub fn min(&self) -> Vec2 {
        self.center - Vec2::splat(self.size / 2.0)
    }

    pub fn max(&self) -> Vec2 {
        self.center + Vec2::splat(self.size / 2.0)
    }
}

/// Number of bricks needed along each axis to cover `rect`.
///
/// Partial cells round up, so the last row/column may overhang the rectangle.
pub fn brick_counts(rect: &WallRect, brick_size: f32) -> UVec2 {
    UVec2::new(
        (rect.width / brick_size).ceil() as u32,
        (rect.height / brick_size).ceil() as u32,
    )
}

/// Covers a wall rectangle with square bricks, column by column.
///
/// Bricks start at the rectangle's top-left corner; when a side is not a multiple of
/// `brick_size`, the last brick on that side extends past the rectangle's edge.
pub fn tile_wall(rect: &WallRect, brick_size: f32) -> Vec<Brick> {
    let counts = brick_counts(rect, brick_size);
    let half = brick_size / 2.0;

    let mut bricks = Vec::with_capacity((counts.x * counts.y) as usize);
    for i in 0..counts.x {
        for j in 0..counts.y {
            let corner = rect.min() + Vec2::new(i as f32, j as f32) * brick_size;
            bricks.push(Brick {
                center: corner + Vec2::splat(half),
                size: brick_size,
            });
        }
    }
    bricks
}

/// Tiles every wall of a layout, preserving layout order.
pub fn tile_maze(layout: &MazeLayout, brick_size: f32) -> Vec<Brick> {
    layout.walls().iter().flat_map(|wall| tile_wall(wall, brick_size)).collect()
}

/// Positions of the energy dots: a regular grid inset from the playfield edges.
///
/// Dots are placed at `margin, margin + spacing, ...` while strictly below
/// `extent - margin` on each axis. Walls are not taken into account.
pub fn dot_grid(world_size: UVec2, spacing: f32, margin: f32) -> Vec<Vec2> {
    let limit = world_size.as_vec2() - Vec2::splat(margin);

    let axis = |end: f32| {
        let mut values = Vec::new();
        let mut v = margin;
        while v < end {
            values.push(v);
            v += spacing;
        }
        values
    };

    let xs = axis(limit.x);
    let ys = axis(limit.y);

    xs.iter().flat_map(|&x| ys.iter().map(move |&y| Vec2::new(x, y))).collect()
}
