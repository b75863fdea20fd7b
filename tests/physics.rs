use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use hippo_maze::systems::{
    components::{Body, DeltaTime, Position, Velocity, Wall},
    physics::{confine, physics_system, separate, Aabb, Axis},
};
use speculoos::prelude::*;

mod common;

fn body(size: f32, bounce: f32) -> Body {
    Body {
        size: Vec2::splat(size),
        bounce,
        collide_world_bounds: true,
    }
}

#[test]
fn test_touching_boxes_do_not_overlap() {
    let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
    let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
    let c = Aabb::new(Vec2::new(9.0, 9.0), Vec2::new(20.0, 20.0));

    assert_that(&a.overlaps(&b)).is_false();
    assert_that(&a.penetration(&b)).is_none();
    assert_that(&a.overlaps(&c)).is_true();
    assert_that(&a.penetration(&c)).is_equal_to(Some(Vec2::new(1.0, 1.0)));
}

#[test]
fn test_separate_bounces_off_wall() {
    let wall = Aabb::new(Vec2::new(105.0, 80.0), Vec2::new(130.0, 120.0));
    let mut position = Vec2::new(100.0, 100.0);
    let mut velocity = Vec2::new(50.0, 10.0);

    let hit = separate(&mut position, &mut velocity, &body(20.0, 1.0), &wall, Axis::X);

    assert_that(&hit).is_true();
    assert_that(&position).is_equal_to(Vec2::new(95.0, 100.0));
    assert_that(&velocity).is_equal_to(Vec2::new(-50.0, 10.0));
}

#[test]
fn test_separate_without_bounce_stops_axis() {
    let wall = Aabb::new(Vec2::new(80.0, 105.0), Vec2::new(120.0, 130.0));
    let mut position = Vec2::new(100.0, 100.0);
    let mut velocity = Vec2::new(30.0, 200.0);

    separate(&mut position, &mut velocity, &body(20.0, 0.0), &wall, Axis::Y);

    assert_that(&position).is_equal_to(Vec2::new(100.0, 95.0));
    assert_that(&velocity.y).is_equal_to(0.0);
    assert_that(&velocity.x).is_equal_to(30.0);
}

#[test]
fn test_separate_keeps_velocity_moving_away() {
    let wall = Aabb::new(Vec2::new(105.0, 80.0), Vec2::new(130.0, 120.0));
    let mut position = Vec2::new(100.0, 100.0);
    let mut velocity = Vec2::new(-40.0, 0.0);

    separate(&mut position, &mut velocity, &body(20.0, 1.0), &wall, Axis::X);

    assert_that(&velocity).is_equal_to(Vec2::new(-40.0, 0.0));
}

#[test]
fn test_confine_to_world_edges() {
    let bounds = Aabb::world();

    let mut position = Vec2::new(5.0, 300.0);
    let mut velocity = Vec2::new(-100.0, 0.0);
    confine(&mut position, &mut velocity, &body(20.0, 1.0), &bounds);
    assert_that(&position).is_equal_to(Vec2::new(10.0, 300.0));
    assert_that(&velocity).is_equal_to(Vec2::new(100.0, 0.0));

    let mut position = Vec2::new(500.0, 774.0);
    let mut velocity = Vec2::new(0.0, 200.0);
    confine(&mut position, &mut velocity, &body(64.0, 0.0), &bounds);
    assert_that(&position).is_equal_to(Vec2::new(500.0, 743.0));
    assert_that(&velocity.y).is_equal_to(0.0);
}

#[test]
fn test_physics_system_integrates_velocity() {
    let mut world = common::create_test_world();
    world.insert_resource(DeltaTime(0.5));
    let mover = world
        .spawn((
            Position(Vec2::new(300.0, 300.0)),
            Velocity(Vec2::new(10.0, -20.0)),
            body(20.0, 1.0),
        ))
        .id();

    world.run_system_once(physics_system).expect("System should run successfully");

    assert_that(&world.get::<Position>(mover).unwrap().0).is_equal_to(Vec2::new(305.0, 290.0));
}

#[test]
fn test_player_stops_against_brick() {
    let mut world = common::create_test_world();
    world.insert_resource(DeltaTime(0.1));
    world.spawn((Wall, Position(Vec2::new(122.5, 100.0)), Body::fixed(Vec2::splat(25.0))));
    let player = world
        .spawn((Position(Vec2::new(100.0, 100.0)), Velocity(Vec2::new(100.0, 0.0)), body(20.0, 0.0)))
        .id();

    world.run_system_once(physics_system).expect("System should run successfully");

    let position = world.get::<Position>(player).unwrap().0;
    assert!(position.abs_diff_eq(Vec2::new(100.0, 100.0), 1e-3), "got {position:?}");
    assert_that(&world.get::<Velocity>(player).unwrap().0.x).is_equal_to(0.0);
}

#[test]
fn test_enemy_reflects_off_brick() {
    let mut world = common::create_test_world();
    world.insert_resource(DeltaTime(0.1));
    world.spawn((Wall, Position(Vec2::new(300.0, 172.5)), Body::fixed(Vec2::splat(25.0))));
    let enemy = world
        .spawn((Position(Vec2::new(300.0, 110.0)), Velocity(Vec2::new(0.0, 200.0)), body(72.0, 1.0)))
        .id();

    world.run_system_once(physics_system).expect("System should run successfully");

    assert_that(&world.get::<Velocity>(enemy).unwrap().0).is_equal_to(Vec2::new(0.0, -200.0));
    let position = world.get::<Position>(enemy).unwrap().0;
    assert!((position.y - 124.0).abs() < 1e-3, "got {position:?}");
}

#[test]
fn test_separate_ignores_other_axis() {
    // Deep on x, shallow on y: resolving y must not move x
    let wall = Aabb::new(Vec2::new(95.0, 108.0), Vec2::new(115.0, 130.0));
    let mut position = Vec2::new(100.0, 100.0);
    let mut velocity = Vec2::new(50.0, 50.0);

    separate(&mut position, &mut velocity, &body(20.0, 1.0), &wall, Axis::X);
    assert_that(&position).is_equal_to(Vec2::new(85.0, 100.0));

    let mut position = Vec2::new(100.0, 100.0);
    separate(&mut position, &mut velocity, &body(20.0, 1.0), &wall, Axis::Y);
    assert_that(&position).is_equal_to(Vec2::new(100.0, 98.0));
}

#[test]
fn test_resting_contact_is_not_separated() {
    let wall = Aabb::new(Vec2::new(80.0, 110.0 - 1e-4), Vec2::new(120.0, 135.0));
    let mut position = Vec2::new(100.0, 100.0);
    let mut velocity = Vec2::new(100.0, 0.0);

    let hit = separate(&mut position, &mut velocity, &body(20.0, 0.0), &wall, Axis::X);

    assert_that(&hit).is_false();
    assert_that(&position).is_equal_to(Vec2::new(100.0, 100.0));
    assert_that(&velocity).is_equal_to(Vec2::new(100.0, 0.0));
}

#[test]
fn test_enemy_sliding_into_brick_column_only_reflects_x() {
    let mut world = common::create_test_world();
    world.insert_resource(DeltaTime(1.0 / 60.0));
    for row in 0..4 {
        world.spawn((
            Wall,
            Position(Vec2::new(512.5, 312.5 + 25.0 * row as f32)),
            Body::fixed(Vec2::splat(25.0)),
        ));
    }
    // Bottom edge ends 1 px into the top brick, right edge 1.33 px into the column
    let enemy = world
        .spawn((
            Position(Vec2::new(462.0, 264.5)),
            Velocity(Vec2::new(200.0, 30.0)),
            body(72.0, 1.0),
        ))
        .id();

    world.run_system_once(physics_system).expect("System should run successfully");

    assert_that(&world.get::<Velocity>(enemy).unwrap().0).is_equal_to(Vec2::new(-200.0, 30.0));
    let position = world.get::<Position>(enemy).unwrap().0;
    assert!(position.abs_diff_eq(Vec2::new(464.0, 265.0), 1e-3), "got {position:?}");
}

#[test]
fn test_long_frame_cannot_pass_through_brick() {
    let mut world = common::create_test_world();
    world.insert_resource(DeltaTime(0.5));
    world.spawn((Wall, Position(Vec2::new(150.0, 100.0)), Body::fixed(Vec2::splat(25.0))));
    let player = world
        .spawn((Position(Vec2::new(100.0, 100.0)), Velocity(Vec2::new(200.0, 0.0)), body(64.0, 0.0)))
        .id();

    world.run_system_once(physics_system).expect("System should run successfully");

    let position = world.get::<Position>(player).unwrap().0;
    assert!(position.abs_diff_eq(Vec2::new(105.5, 100.0), 1e-3), "got {position:?}");
    assert_that(&world.get::<Velocity>(player).unwrap().0).is_equal_to(Vec2::ZERO);
}
