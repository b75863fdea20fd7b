#![allow(dead_code)]

use bevy_ecs::{
    entity::Entity,
    event::{EventRegistry, Events},
    query::With,
    world::World,
};
use glam::{UVec2, Vec2};
use hippo_maze::{
    asset::{Asset, TextureCatalog},
    config::GameConfig,
    constants::display,
    error::GameError,
    events::GameEvent,
    game::Game,
    map::{layout::MazeLayout, loader::LevelState},
    systems::{
        animation::{AnimationFinished, AnimationKey, AnimationLibrary, AnimationPlayer},
        components::{
            Body, DeltaTime, DotsCollected, EnergyDot, GameRng, GlobalState, PlayerControlled, Position, Renderable,
            SceneMember, Velocity,
        },
        enemy::{Enemy, EnemyKind},
        input::{Bindings, KeyEvent, KeyboardState},
        scene::EnemyRoster,
        state::{PauseState, RoundState},
    },
};
use strum::IntoEnumIterator;

/// A catalog claiming every texture is loaded, with sheets wide enough for their animations.
pub fn full_catalog() -> TextureCatalog {
    let mut catalog = TextureCatalog::default();
    for asset in Asset::iter() {
        let size = match asset.frame_size() {
            Some(frame) => UVec2::new(frame.x * 6, frame.y),
            None => UVec2::splat(25),
        };
        catalog.insert(asset, size);
    }
    catalog
}

/// Creates a world holding every resource and event the gameplay systems use, with the
/// built-in maze already loaded.
pub fn create_test_world() -> World {
    let mut world = World::new();

    EventRegistry::register_event::<GameError>(&mut world);
    EventRegistry::register_event::<GameEvent>(&mut world);
    EventRegistry::register_event::<KeyEvent>(&mut world);
    EventRegistry::register_event::<AnimationFinished>(&mut world);

    let catalog = full_catalog();
    let (animations, errors) = AnimationLibrary::with_builtin(&catalog);
    assert!(errors.is_empty(), "full catalog should define every animation");

    world.insert_resource(catalog);
    world.insert_resource(animations);
    world.insert_resource(GameRng::seeded(7));
    world.insert_resource(EnemyRoster::default());
    world.insert_resource(LevelState::Ready(MazeLayout::builtin()));
    world.insert_resource(GlobalState::default());
    world.insert_resource(DeltaTime(1.0 / 60.0));
    world.insert_resource(DotsCollected::default());
    world.insert_resource(RoundState::default());
    world.insert_resource(PauseState::default());
    world.insert_resource(Bindings::default());
    world.insert_resource(KeyboardState::default());

    world
}

fn animation(world: &World, key: AnimationKey) -> AnimationPlayer {
    let def = *world.resource::<AnimationLibrary>().get(key).expect("animation should be defined");
    AnimationPlayer::new(def)
}

/// Spawns a stationary player at `position`.
pub fn spawn_test_player(world: &mut World, position: Vec2) -> Entity {
    let walk = animation(world, AnimationKey::Move);
    world
        .spawn((
            PlayerControlled,
            Position(position),
            Velocity::default(),
            Body {
                size: display::PLAYER,
                bounce: 0.0,
                collide_world_bounds: true,
            },
            Renderable {
                asset: Asset::Hippo,
                size: display::PLAYER,
                layer: 3,
            },
            walk,
            SceneMember,
        ))
        .id()
}

pub fn spawn_test_enemy(world: &mut World, kind: EnemyKind, position: Vec2, velocity: Vec2) -> Entity {
    let anim = animation(world, kind.animation());
    world
        .spawn((
            Enemy(kind),
            Position(position),
            Velocity(velocity),
            Body {
                size: display::ENEMY,
                bounce: 1.0,
                collide_world_bounds: true,
            },
            Renderable {
                asset: kind.sheet(),
                size: display::ENEMY,
                layer: 2,
            },
            anim,
            SceneMember,
        ))
        .id()
}

pub fn spawn_test_dot(world: &mut World, position: Vec2) -> Entity {
    world
        .spawn((EnergyDot, Position(position), Body::fixed(Vec2::splat(15.0)), SceneMember))
        .id()
}

/// Sends a game event to the world
pub fn send_game_event(world: &mut World, event: GameEvent) {
    world.send_event(event);
}

/// Takes every pending event of type `E` out of the world.
pub fn drain_events<E: bevy_ecs::event::Event>(world: &mut World) -> Vec<E> {
    world.resource_mut::<Events<E>>().drain().collect()
}

pub fn count_with<C: bevy_ecs::component::Component>(world: &mut World) -> usize {
    world.query_filtered::<Entity, With<C>>().iter(world).count()
}

/// A game on the built-in maze with every texture available and a fixed seed.
pub fn create_test_game(seed: u64) -> Game {
    let config = GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    };
    Game::new(&config, full_catalog())
}
