//! A minimal arcade physics layer: velocity integration, axis-aligned separation from
//! static walls, bouncing, and confinement to the playfield.

use bevy_ecs::{
    query::{With, Without},
    system::{Query, Res},
};
use glam::Vec2;

use crate::constants::{BRICK_SIZE, WORLD_SIZE};
use crate::systems::components::{Body, DeltaTime, Position, Velocity, Wall};

/// Largest distance a body moves along one axis before walls are checked again.
pub const MAX_STEP: f32 = BRICK_SIZE / 2.0;

/// Overlaps this shallow are treated as touching.
const CONTACT_SLOP: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self::new(center - half, center + half)
    }

    /// The whole playfield.
    pub fn world() -> Self {
        Self::new(Vec2::ZERO, WORLD_SIZE.as_vec2())
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Whether the boxes share any area. Boxes that only touch do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x && self.min.y < other.max.y && self.max.y > other.min.y
    }

    /// Depth of the overlap along each axis, or `None` when the boxes do not overlap.
    pub fn penetration(&self, other: &Aabb) -> Option<Vec2> {
        if !self.overlaps(other) {
            return None;
        }
        Some(self.max.min(other.max) - self.min.max(other.min))
    }
}

/// Reverses (and damps) a velocity component if it points along `push`'s opposite.
fn rebound(velocity: f32, push: f32, bounce: f32) -> f32 {
    if velocity * push < 0.0 {
        -velocity * bounce
    } else {
        velocity
    }
}

/// A movement axis, resolved one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn get(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    fn get_mut(self, v: &mut Vec2) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
        }
    }
}

/// Pushes a body out of a static obstacle along `axis` only.
///
/// The velocity component on that axis rebounds by the body's bounce factor, so a
/// bounce of `0` stops the body on that axis and `1` reflects it. The other axis is
/// left untouched, so sliding along a wall of several bricks never flips it.
///
/// # Returns
///
/// `true` if the body was overlapping the obstacle.
pub fn separate(position: &mut Vec2, velocity: &mut Vec2, body: &Body, obstacle: &Aabb, axis: Axis) -> bool {
    let Some(depth) = Aabb::from_center(*position, body.size).penetration(obstacle) else {
        return false;
    };
    // Resting contact leaves float noise behind; it must not count on the other axis
    if depth.min_element() <= CONTACT_SLOP {
        return false;
    }

    let push = if axis.get(*position - obstacle.center()) < 0.0 { -1.0 } else { 1.0 };
    *axis.get_mut(position) += push * axis.get(depth);
    let speed = axis.get(*velocity);
    *axis.get_mut(velocity) = rebound(speed, push, body.bounce);
    true
}

/// Keeps a body inside `bounds`, rebounding off the edges it hits.
pub fn confine(position: &mut Vec2, velocity: &mut Vec2, body: &Body, bounds: &Aabb) {
    let half = body.size / 2.0;

    if position.x - half.x < bounds.min.x {
        position.x = bounds.min.x + half.x;
        velocity.x = rebound(velocity.x, 1.0, body.bounce);
    } else if position.x + half.x > bounds.max.x {
        position.x = bounds.max.x - half.x;
        velocity.x = rebound(velocity.x, -1.0, body.bounce);
    }

    if position.y - half.y < bounds.min.y {
        position.y = bounds.min.y + half.y;
        velocity.y = rebound(velocity.y, 1.0, body.bounce);
    } else if position.y + half.y > bounds.max.y {
        position.y = bounds.max.y - half.y;
        velocity.y = rebound(velocity.y, -1.0, body.bounce);
    }
}

/// Moves every body with a velocity, then resolves walls and the playfield edges.
///
/// Long frames are split into substeps of at most [`MAX_STEP`] per axis so bodies cannot
/// skip over a brick. Each substep moves and resolves x first, then y.
pub fn physics_system(
    delta_time: Res<DeltaTime>,
    walls: Query<(&Position, &Body), (With<Wall>, Without<Velocity>)>,
    mut movers: Query<(&mut Position, &mut Velocity, &Body), Without<Wall>>,
) {
    let obstacles: Vec<Aabb> = walls.iter().map(|(p, b)| Aabb::from_center(p.0, b.size)).collect();
    let bounds = Aabb::world();

    for (mut position, mut velocity, body) in movers.iter_mut() {
        let mut pos = position.0;
        let mut vel = velocity.0;

        let travel = (vel * delta_time.0).abs().max_element();
        let steps = (travel / MAX_STEP).ceil().max(1.0) as u32;
        let dt = delta_time.0 / steps as f32;

        for _ in 0..steps {
            for axis in [Axis::X, Axis::Y] {
                *axis.get_mut(&mut pos) += axis.get(vel) * dt;
                for obstacle in &obstacles {
                    separate(&mut pos, &mut vel, body, obstacle, axis);
                }
            }

            if body.collide_world_bounds {
                confine(&mut pos, &mut vel, body, &bounds);
            }
        }

        position.0 = pos;
        if vel != velocity.0 {
            velocity.0 = vel;
        }
    }
}
