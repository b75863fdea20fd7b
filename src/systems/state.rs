use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use tracing::{debug, error, info};

use crate::asset::TextureCatalog;
use crate::constants::mechanics::RESTART_DELAY;
use crate::error::GameError;
use crate::events::{GameCommand, GameEvent};
use crate::map::loader::LevelState;
use crate::systems::animation::{AnimationFinished, AnimationKey, AnimationLibrary, AnimationPlayer};
use crate::systems::components::{DeltaTime, DotsCollected, GameRng, GlobalState, PlayerControlled, SceneMember, Velocity};
use crate::systems::enemy::Enemy;
use crate::systems::scene::{spawn_scene, EnemyRoster, SceneAssets};

/// Progress of the current round. Anything other than `Playing` counts as game over.
#[derive(Resource, Debug, Default, PartialEq, Clone, Copy)]
pub enum RoundState {
    #[default]
    Playing,
    /// The player was caught and the death animation is playing.
    Dying,
    /// The death animation is over; the scene restarts once `remaining` reaches zero.
    Restarting { remaining: f32 },
}

impl RoundState {
    pub fn is_playing(&self) -> bool {
        matches!(self, RoundState::Playing)
    }

    /// Ends the round.
    ///
    /// # Returns
    ///
    /// `true` only when this call moved the round out of `Playing`, so a single
    /// collision episode is handled exactly once.
    pub fn begin_death(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        *self = RoundState::Dying;
        true
    }
}

#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum PauseState {
    #[default]
    Inactive,
    Active,
}

impl PauseState {
    pub fn active(&self) -> bool {
        matches!(self, PauseState::Active)
    }

    pub fn toggle(&mut self) {
        *self = match self {
            PauseState::Inactive => PauseState::Active,
            PauseState::Active => PauseState::Inactive,
        };
    }
}

/// Run condition for systems that only act while the round is live.
pub fn round_playing(round: Res<RoundState>) -> bool {
    round.is_playing()
}

pub fn not_paused(pause: Res<PauseState>) -> bool {
    !pause.active()
}

/// Handles exit and pause requests.
pub fn command_system(
    mut events: EventReader<GameEvent>,
    mut state: ResMut<GlobalState>,
    mut pause: ResMut<PauseState>,
) {
    for event in events.read() {
        match event {
            GameEvent::Command(GameCommand::Exit) => {
                info!("Exit requested");
                state.exit = true;
            }
            GameEvent::Command(GameCommand::TogglePause) => {
                pause.toggle();
                info!(paused = pause.active(), "Pause toggled");
            }
            GameEvent::Collision(..) => {}
        }
    }
}

/// Ends the round on the first contact between the player and an enemy.
///
/// The player freezes and starts its death animation. Without a death animation the
/// round goes straight to the restart countdown.
pub fn hit_enemy_system(
    mut events: EventReader<GameEvent>,
    mut round: ResMut<RoundState>,
    library: Res<AnimationLibrary>,
    enemies: Query<&Enemy>,
    mut players: Query<(&mut Velocity, &mut AnimationPlayer), With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    for event in events.read() {
        let GameEvent::Collision(player, other) = *event else {
            continue;
        };
        let Ok(enemy) = enemies.get(other) else {
            continue;
        };
        if !round.begin_death() {
            continue;
        }

        info!(player = ?player, enemy = ?other, kind = %enemy.0, "Player caught");

        let Ok((mut velocity, mut animation)) = players.get_mut(player) else {
            continue;
        };
        velocity.0 = Vec2::ZERO;

        match library.get(AnimationKey::Death) {
            Ok(death) => animation.play(*death),
            Err(e) => {
                error!(error = %e, "Cannot play death animation");
                errors.write(e.into());
                *round = RoundState::Restarting {
                    remaining: RESTART_DELAY,
                };
            }
        }
    }
}

/// Starts the restart countdown once the player's death animation has finished.
pub fn death_sequence_system(
    mut finished: EventReader<AnimationFinished>,
    mut round: ResMut<RoundState>,
    players: Query<(), With<PlayerControlled>>,
) {
    for event in finished.read() {
        if event.key != AnimationKey::Death || !players.contains(event.entity) {
            continue;
        }
        if *round == RoundState::Dying {
            debug!(delay = RESTART_DELAY, "Death animation over, restarting soon");
            *round = RoundState::Restarting {
                remaining: RESTART_DELAY,
            };
        }
    }
}

/// Counts down the restart delay, then rebuilds the scene from the loaded level.
#[allow(clippy::too_many_arguments)]
pub fn restart_system(
    mut commands: Commands,
    delta_time: Res<DeltaTime>,
    mut round: ResMut<RoundState>,
    level: Res<LevelState>,
    catalog: Res<TextureCatalog>,
    animations: Res<AnimationLibrary>,
    roster: Res<EnemyRoster>,
    mut rng: ResMut<GameRng>,
    mut collected: ResMut<DotsCollected>,
    scene: Query<Entity, With<SceneMember>>,
    mut errors: EventWriter<GameError>,
) {
    let RoundState::Restarting { remaining } = *round else {
        return;
    };

    let remaining = remaining - delta_time.0;
    if remaining > 0.0 {
        *round = RoundState::Restarting { remaining };
        return;
    }

    let Some(layout) = level.layout() else {
        return;
    };

    let despawned = scene.iter().count();
    for entity in scene.iter() {
        commands.entity(entity).despawn();
    }
    debug!(despawned, "Scene cleared");

    let assets = SceneAssets {
        catalog: &catalog,
        animations: &animations,
    };
    if let Err(e) = spawn_scene(&mut commands, layout, &assets, &roster, &mut rng.0) {
        error!(error = %e, "Scene setup aborted");
        errors.write(e);
    }

    collected.0 = 0;
    *round = RoundState::Playing;
    info!("Scene restarted");
}
