//! The game world and the per-frame system schedule.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use tracing::{debug, info, warn};

use crate::asset::TextureCatalog;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::GameEvent;
use crate::formatter;
use crate::map::loader::{level_ready, LevelState};
use crate::systems::animation::{animation_system, AnimationFinished, AnimationLibrary};
use crate::systems::collision::{collision_system, dot_collection_system};
use crate::systems::components::{DeltaTime, DotsCollected, GameRng, GlobalState};
use crate::systems::enemy::enemy_behavior_system;
use crate::systems::input::{input_system, Bindings, KeyEvent, KeyboardState};
use crate::systems::physics::physics_system;
use crate::systems::player::player_input_system;
use crate::systems::scene::level_load_system;
use crate::systems::state::{
    command_system, death_sequence_system, hit_enemy_system, not_paused, restart_system, round_playing, PauseState,
    RoundState,
};

/// Stages of a frame, run in declaration order.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Waits for the level and builds the first scene
    Load,
    /// Keyboard state, commands and the player's velocity
    Input,
    /// Enemy decisions, movement and overlap detection
    Update,
    /// Reactions to collisions and the round lifecycle
    Respond,
    /// Sprite animation playback
    Animate,
}

/// Owns every piece of game state and the schedule that advances it.
///
/// The game is headless: a frontend feeds it key events and frame times, and reads the
/// world back to draw it.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Sets up the world, starts loading the level and configures the schedule.
    ///
    /// `catalog` lists the textures the frontend loaded. Animations whose sprite sheet is
    /// missing are left undefined (and logged); the scene setup later reports them.
    pub fn new(config: &GameConfig, catalog: TextureCatalog) -> Game {
        info!(textures = catalog.len(), "Starting game initialization");

        let mut world = World::default();
        let mut schedule = Schedule::default();

        debug!("Registering events");
        EventRegistry::register_event::<GameError>(&mut world);
        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<KeyEvent>(&mut world);
        EventRegistry::register_event::<AnimationFinished>(&mut world);

        let (animations, failures) = AnimationLibrary::with_builtin(&catalog);
        for failure in &failures {
            warn!(error = %failure, "Animation unavailable");
        }

        let rng = match config.seed {
            Some(seed) => {
                info!(seed, "Using fixed RNG seed");
                GameRng::seeded(seed)
            }
            None => GameRng::from_entropy(),
        };

        debug!("Inserting resources");
        world.insert_resource(catalog);
        world.insert_resource(animations);
        world.insert_resource(rng);
        world.insert_resource(config.roster.clone());
        world.insert_resource(LevelState::load(&config.level));
        world.insert_resource(GlobalState::default());
        world.insert_resource(DeltaTime::default());
        world.insert_resource(DotsCollected::default());
        world.insert_resource(RoundState::default());
        world.insert_resource(PauseState::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(KeyboardState::default());

        debug!("Configuring system schedule");
        Self::configure_schedule(&mut schedule);

        Game { world, schedule }
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                level_load_system.in_set(GameplaySet::Load),
                (
                    input_system,
                    command_system,
                    player_input_system
                        .run_if(level_ready)
                        .run_if(round_playing)
                        .run_if(not_paused),
                )
                    .chain()
                    .in_set(GameplaySet::Input),
                (
                    enemy_behavior_system.run_if(round_playing),
                    physics_system,
                    collision_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (
                    dot_collection_system,
                    hit_enemy_system,
                    death_sequence_system,
                    restart_system,
                )
                    .chain()
                    .in_set(GameplaySet::Respond),
                animation_system.in_set(GameplaySet::Animate),
            ))
            .configure_sets(
                (
                    GameplaySet::Load,
                    GameplaySet::Input,
                    GameplaySet::Update,
                    GameplaySet::Respond,
                    GameplaySet::Animate,
                )
                    .chain(),
            )
            .configure_sets((
                GameplaySet::Update.run_if(level_ready).run_if(not_paused),
                GameplaySet::Respond.run_if(level_ready).run_if(not_paused),
                GameplaySet::Animate.run_if(level_ready).run_if(not_paused),
            ));
    }

    /// Queues a key press or release for the next tick.
    pub fn send_key(&mut self, event: KeyEvent) {
        self.world.send_event(event);
    }

    /// Runs one frame of `dt` seconds.
    ///
    /// # Returns
    ///
    /// `true` once the game has been asked to exit.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime(dt));
        formatter::increment_frame();

        self.schedule.run(&mut self.world);

        // Events survive one extra frame, then are dropped
        self.world.resource_mut::<Events<KeyEvent>>().update();
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<AnimationFinished>>().update();
        self.world.resource_mut::<Events<GameError>>().update();

        self.world.resource::<GlobalState>().exit
    }

    pub fn is_ready(&self) -> bool {
        self.world.resource::<LevelState>().is_ready()
    }

    pub fn round(&self) -> RoundState {
        *self.world.resource::<RoundState>()
    }

    pub fn dots_collected(&self) -> u32 {
        self.world.resource::<DotsCollected>().0
    }
}
