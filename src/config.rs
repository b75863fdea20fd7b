//! Runtime configuration, read from the command line.

use std::path::PathBuf;

use clap::Parser;

use crate::constants::mechanics::ENEMY_COUNT;
use crate::map::loader::LevelSource;
use crate::systems::enemy::EnemyKind;
use crate::systems::scene::EnemyRoster;

/// Asset directory used when `--assets` is not given.
pub const DEFAULT_ASSET_DIR: &str = "assets";

/// Command-line arguments of the desktop game.
#[derive(Parser, Debug)]
#[command(name = "hippo-maze")]
#[command(about = "Guide the hippo through the maze, collect energy dots and avoid the hunters")]
pub struct Args {
    /// Load the maze from a JSON level file instead of the built-in one
    #[arg(long)]
    pub level: Option<PathBuf>,

    /// Seed the random number generator for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Populate the maze with wander-only drifters
    #[arg(long)]
    pub drifters: bool,

    /// Number of enemies per scene
    #[arg(long, default_value_t = ENEMY_COUNT)]
    pub enemies: usize,

    /// Directory holding the textures
    #[arg(long, default_value = DEFAULT_ASSET_DIR)]
    pub assets: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub level: LevelSource,
    /// Fixed RNG seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub roster: EnemyRoster,
    pub asset_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level: LevelSource::Builtin,
            seed: None,
            roster: EnemyRoster::default(),
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
        }
    }
}

impl From<Args> for GameConfig {
    fn from(args: Args) -> Self {
        let pool = if args.drifters {
            vec![EnemyKind::Drifter]
        } else {
            EnemyKind::HUNTERS.to_vec()
        };

        Self {
            level: args.level.map_or(LevelSource::Builtin, LevelSource::File),
            seed: args.seed,
            roster: EnemyRoster {
                pool,
                count: args.enemies,
            },
            asset_dir: args.assets,
        }
    }
}
