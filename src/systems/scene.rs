//! Building the scene: walls, dots, the player and the enemies.

use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{Commands, Res, ResMut},
};
use glam::Vec2;
use rand::{seq::IndexedRandom, Rng};
use tracing::{debug, error, info};

use crate::asset::{Asset, TextureCatalog};
use crate::constants::{
    display, dots,
    mechanics::ENEMY_COUNT,
    spawn::{ENEMY_MAX, ENEMY_MIN, PLAYER_START},
    BRICK_SIZE, WORLD_SIZE,
};
use crate::error::{GameError, GameResult};
use crate::map::builder::{dot_grid, tile_maze};
use crate::map::layout::MazeLayout;
use crate::map::loader::LevelState;
use crate::systems::animation::{AnimationKey, AnimationLibrary, AnimationPlayer};
use crate::systems::components::{
    Body, DotBundle, EnergyDot, EnemyBundle, GameRng, PlayerBundle, PlayerControlled, Position, Renderable,
    SceneMember, Velocity, Wall, WallBundle,
};
use crate::systems::enemy::{random_velocity, Enemy, EnemyKind};

/// Draw order, back to front.
pub mod layer {
    pub const WALL: u8 = 0;
    pub const DOT: u8 = 1;
    pub const ENEMY: u8 = 2;
    pub const PLAYER: u8 = 3;
}

/// Which enemies a scene is populated with.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EnemyRoster {
    /// Kinds to pick from, uniformly. An empty pool falls back to [`EnemyKind::HUNTERS`].
    pub pool: Vec<EnemyKind>,
    pub count: usize,
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self {
            pool: EnemyKind::HUNTERS.to_vec(),
            count: ENEMY_COUNT,
        }
    }
}

impl EnemyRoster {
    fn kinds(&self) -> &[EnemyKind] {
        if self.pool.is_empty() {
            &EnemyKind::HUNTERS
        } else {
            &self.pool
        }
    }
}

/// Read-only inputs shared by every spawn function.
pub struct SceneAssets<'a> {
    pub catalog: &'a TextureCatalog,
    pub animations: &'a AnimationLibrary,
}

pub fn spawn_walls(commands: &mut Commands, layout: &MazeLayout) -> usize {
    let bricks = tile_maze(layout, BRICK_SIZE);
    let count = bricks.len();

    commands.spawn_batch(bricks.into_iter().map(|brick| WallBundle {
        wall: Wall,
        position: Position(brick.center),
        body: Body::fixed(Vec2::splat(brick.size)),
        sprite: Renderable {
            asset: Asset::Brick,
            size: Vec2::splat(brick.size),
            layer: layer::WALL,
        },
        scene: SceneMember,
    }));

    count
}

pub fn spawn_dots(commands: &mut Commands) -> usize {
    let positions = dot_grid(WORLD_SIZE, dots::SPACING, dots::MARGIN);
    let count = positions.len();
    let size = Vec2::splat(dots::SIZE);

    commands.spawn_batch(positions.into_iter().map(move |position| DotBundle {
        dot: EnergyDot,
        position: Position(position),
        body: Body::fixed(size),
        sprite: Renderable {
            asset: Asset::EnergyDot,
            size,
            layer: layer::DOT,
        },
        scene: SceneMember,
    }));

    count
}

/// Spawns the hippo at its start point, playing the walk animation.
pub fn spawn_player(commands: &mut Commands, assets: &SceneAssets) -> GameResult<()> {
    assets.catalog.require(Asset::Hippo)?;
    let walk = *assets.animations.get(AnimationKey::Move)?;

    let player = commands
        .spawn(PlayerBundle {
            player: PlayerControlled,
            position: Position(PLAYER_START),
            velocity: Velocity::default(),
            body: Body {
                size: display::PLAYER,
                bounce: 0.0,
                collide_world_bounds: true,
            },
            sprite: Renderable {
                asset: Asset::Hippo,
                size: display::PLAYER,
                layer: layer::PLAYER,
            },
            animation: AnimationPlayer::new(walk),
            scene: SceneMember,
        })
        .id();

    debug!(entity = ?player, position = ?PLAYER_START, "Player spawned");
    Ok(())
}

/// Spawns the roster's enemies at random positions with random headings.
///
/// Every kind in the pool must have its texture and animation available, even if the
/// dice never pick it; otherwise nothing is spawned.
pub fn spawn_enemies<R: Rng>(
    commands: &mut Commands,
    assets: &SceneAssets,
    roster: &EnemyRoster,
    rng: &mut R,
) -> GameResult<usize> {
    let kinds = roster.kinds();
    for kind in kinds {
        assets.catalog.require(kind.sheet())?;
        assets.animations.get(kind.animation())?;
    }

    for _ in 0..roster.count {
        let Some(&kind) = kinds.choose(rng) else {
            break;
        };
        let animation = *assets.animations.get(kind.animation())?;

        let position = Vec2::new(
            rng.random_range(ENEMY_MIN.x..=ENEMY_MAX.x) as f32,
            rng.random_range(ENEMY_MIN.y..=ENEMY_MAX.y) as f32,
        );
        let velocity = random_velocity(rng, kind.speed());

        let enemy = commands
            .spawn(EnemyBundle {
                enemy: Enemy(kind),
                position: Position(position),
                velocity: Velocity(velocity),
                body: Body {
                    size: display::ENEMY,
                    bounce: 1.0,
                    collide_world_bounds: true,
                },
                sprite: Renderable {
                    asset: kind.sheet(),
                    size: display::ENEMY,
                    layer: layer::ENEMY,
                },
                animation: AnimationPlayer::new(animation),
                scene: SceneMember,
            })
            .id();

        debug!(entity = ?enemy, %kind, ?position, ?velocity, "Enemy spawned");
    }

    Ok(roster.count)
}

/// Populates a fresh scene from `layout`.
///
/// Walls and dots are spawned first and stay in place if the player or the enemies
/// cannot be set up.
pub fn spawn_scene<R: Rng>(
    commands: &mut Commands,
    layout: &MazeLayout,
    assets: &SceneAssets,
    roster: &EnemyRoster,
    rng: &mut R,
) -> GameResult<()> {
    let bricks = spawn_walls(commands, layout);
    let dot_count = spawn_dots(commands);
    spawn_player(commands, assets)?;
    let enemies = spawn_enemies(commands, assets, roster, rng)?;

    info!(bricks, dots = dot_count, enemies, "Scene started");
    Ok(())
}

/// Waits for the level and builds the first scene once it arrives.
pub fn level_load_system(
    mut commands: Commands,
    mut level: ResMut<LevelState>,
    catalog: Res<TextureCatalog>,
    animations: Res<AnimationLibrary>,
    roster: Res<EnemyRoster>,
    mut rng: ResMut<GameRng>,
    mut errors: EventWriter<GameError>,
) {
    if !level.poll() {
        return;
    }
    let Some(layout) = level.layout() else {
        return;
    };

    let assets = SceneAssets {
        catalog: &catalog,
        animations: &animations,
    };
    if let Err(e) = spawn_scene(&mut commands, layout, &assets, &roster, &mut rng.0) {
        error!(error = %e, "Scene setup aborted");
        errors.write(e);
    }
}
