use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use hippo_maze::{
    events::GameEvent,
    systems::{
        animation::{AnimationKey, AnimationPlayer},
        collision::{collision_system, dot_collection_system},
        components::{DotsCollected, Velocity},
        enemy::EnemyKind,
        state::{hit_enemy_system, RoundState},
    },
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

#[test]
fn test_collision_system_reports_overlaps() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(200.0, 200.0));
    let dot = common::spawn_test_dot(&mut world, Vec2::new(230.0, 210.0));
    let enemy = common::spawn_test_enemy(&mut world, EnemyKind::Gator, Vec2::new(140.0, 200.0), Vec2::ZERO);
    common::spawn_test_dot(&mut world, Vec2::new(400.0, 400.0));
    common::spawn_test_enemy(&mut world, EnemyKind::Lion, Vec2::new(600.0, 200.0), Vec2::ZERO);

    world.run_system_once(collision_system).expect("System should run successfully");

    let mut events = common::drain_events::<GameEvent>(&mut world);
    events.sort_by_key(|event| match event {
        GameEvent::Collision(_, other) => *other,
        GameEvent::Command(_) => player,
    });
    let mut expected = vec![GameEvent::Collision(player, dot), GameEvent::Collision(player, enemy)];
    expected.sort_by_key(|event| match event {
        GameEvent::Collision(_, other) => *other,
        GameEvent::Command(_) => player,
    });
    assert_eq!(events, expected);
}

#[test]
fn test_edge_contact_is_not_a_collision() {
    let mut world = common::create_test_world();
    // Player spans 168..232, the dot 232..247
    common::spawn_test_player(&mut world, Vec2::new(200.0, 200.0));
    common::spawn_test_dot(&mut world, Vec2::new(239.5, 200.0));

    world.run_system_once(collision_system).expect("System should run successfully");

    assert_that(&common::drain_events::<GameEvent>(&mut world)).is_empty();
}

#[test]
fn test_dot_is_collected_once() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(200.0, 200.0));
    let dot = common::spawn_test_dot(&mut world, Vec2::new(200.0, 200.0));

    common::send_game_event(&mut world, GameEvent::Collision(player, dot));
    world
        .run_system_once(dot_collection_system)
        .expect("System should run successfully");

    assert_that(&world.get_entity(dot).is_ok()).is_false();
    assert_that(&world.resource::<DotsCollected>().0).is_equal_to(1);
}

#[test]
fn test_enemy_contact_does_not_collect() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(200.0, 200.0));
    let enemy = common::spawn_test_enemy(&mut world, EnemyKind::Gator, Vec2::new(200.0, 200.0), Vec2::ZERO);

    common::send_game_event(&mut world, GameEvent::Collision(player, enemy));
    world
        .run_system_once(dot_collection_system)
        .expect("System should run successfully");

    assert_that(&world.get_entity(enemy).is_ok()).is_true();
    assert_that(&world.resource::<DotsCollected>().0).is_equal_to(0);
}

#[test]
fn test_enemy_contact_starts_death() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(200.0, 200.0));
    world.get_mut::<Velocity>(player).unwrap().0 = Vec2::new(200.0, -200.0);
    let enemy = common::spawn_test_enemy(&mut world, EnemyKind::Copter, Vec2::new(210.0, 200.0), Vec2::ZERO);

    common::send_game_event(&mut world, GameEvent::Collision(player, enemy));
    world
        .run_system_once(hit_enemy_system)
        .expect("System should run successfully");

    assert_that(&*world.resource::<RoundState>()).is_equal_to(RoundState::Dying);
    assert_that(&world.get::<Velocity>(player).unwrap().0).is_equal_to(Vec2::ZERO);
    assert_that(&world.get::<AnimationPlayer>(player).unwrap().key()).is_equal_to(AnimationKey::Death);
}

#[test]
fn test_repeated_contact_is_ignored_while_dying() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(200.0, 200.0));
    let first = common::spawn_test_enemy(&mut world, EnemyKind::Gator, Vec2::new(210.0, 200.0), Vec2::ZERO);
    let second = common::spawn_test_enemy(&mut world, EnemyKind::Lion, Vec2::new(190.0, 200.0), Vec2::ZERO);

    common::send_game_event(&mut world, GameEvent::Collision(player, first));
    common::send_game_event(&mut world, GameEvent::Collision(player, second));
    world
        .run_system_once(hit_enemy_system)
        .expect("System should run successfully");

    // Advance the death animation, then touch an enemy again
    world.get_mut::<AnimationPlayer>(player).unwrap().tick(0.1);
    common::send_game_event(&mut world, GameEvent::Collision(player, second));
    world
        .run_system_once(hit_enemy_system)
        .expect("System should run successfully");

    assert_that(&*world.resource::<RoundState>()).is_equal_to(RoundState::Dying);
    assert_that(&world.get::<AnimationPlayer>(player).unwrap().frame()).is_equal_to(1);
}

#[test]
fn test_dot_contact_does_not_end_round() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(200.0, 200.0));
    let dot = common::spawn_test_dot(&mut world, Vec2::new(200.0, 200.0));

    common::send_game_event(&mut world, GameEvent::Collision(player, dot));
    world
        .run_system_once(hit_enemy_system)
        .expect("System should run successfully");

    assert_that(&*world.resource::<RoundState>()).is_equal_to(RoundState::Playing);
}
