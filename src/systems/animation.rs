//! Sprite sheet animations: definitions, the library that holds them, and playback.

use std::collections::HashMap;

use bevy_ecs::{
    component::Component,
    entity::Entity,
    event::{Event, EventWriter},
    resource::Resource,
    system::{Query, Res},
};
use strum_macros::{Display, EnumIter};
use tracing::{debug, trace};

use crate::asset::{Asset, TextureCatalog};
use crate::constants::animation::{DEATH_REPEATS, FRAME_RATE};
use crate::error::AnimationError;
use crate::systems::components::DeltaTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AnimationKey {
    /// The hippo walking.
    Move,
    /// The hippo being caught.
    Death,
    Chopper,
    Snap,
    Roar,
    Drift,
}

/// How many times an animation plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Forever,
    /// Number of extra plays after the first one.
    Times(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationDef {
    pub key: AnimationKey,
    pub sheet: Asset,
    /// First sheet frame, inclusive.
    pub first: u16,
    /// Last sheet frame, inclusive.
    pub last: u16,
    pub frame_rate: f32,
    pub repeat: Repeat,
}

impl AnimationDef {
    pub const fn looping(key: AnimationKey, sheet: Asset, first: u16, last: u16) -> Self {
        Self {
            key,
            sheet,
            first,
            last,
            frame_rate: FRAME_RATE,
            repeat: Repeat::Forever,
        }
    }

    pub fn frame_count(&self) -> u16 {
        self.last - self.first + 1
    }

    pub fn frame_duration(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Total playing time, `None` for animations that never end.
    pub fn duration(&self) -> Option<f32> {
        match self.repeat {
            Repeat::Forever => None,
            Repeat::Times(extra) => Some(self.frame_count() as f32 * (extra + 1) as f32 * self.frame_duration()),
        }
    }

    /// Every animation the game uses.
    pub fn builtin() -> [AnimationDef; 6] {
        [
            AnimationDef::looping(AnimationKey::Move, Asset::Hippo, 0, 5),
            AnimationDef {
                repeat: Repeat::Times(DEATH_REPEATS),
                ..AnimationDef::looping(AnimationKey::Death, Asset::DeadHippo, 0, 3)
            },
            AnimationDef::looping(AnimationKey::Chopper, Asset::Copter, 0, 1),
            AnimationDef::looping(AnimationKey::Snap, Asset::Gator, 0, 2),
            AnimationDef::looping(AnimationKey::Roar, Asset::Lion, 0, 2),
            AnimationDef::looping(AnimationKey::Drift, Asset::Drifter, 0, 0),
        ]
    }
}

/// All defined animations, by key.
#[derive(Resource, Debug, Default, Clone)]
pub struct AnimationLibrary {
    definitions: HashMap<AnimationKey, AnimationDef>,
}

impl AnimationLibrary {
    /// Defines every built-in animation whose sprite sheet is available.
    ///
    /// Animations that cannot be defined are skipped; their errors are returned so the
    /// caller can report them. Looking one up later fails with
    /// [`AnimationError::MissingAnimation`].
    pub fn with_builtin(catalog: &TextureCatalog) -> (Self, Vec<AnimationError>) {
        let mut library = Self::default();
        let errors = AnimationDef::builtin()
            .into_iter()
            .filter_map(|def| library.define(def, catalog).err())
            .collect();
        (library, errors)
    }

    /// Registers an animation, replacing any previous definition with the same key.
    pub fn define(&mut self, def: AnimationDef, catalog: &TextureCatalog) -> Result<(), AnimationError> {
        if def.last < def.first {
            return Err(AnimationError::EmptyRange {
                key: def.key,
                first: def.first,
                last: def.last,
            });
        }
        if !catalog.contains(def.sheet) {
            return Err(AnimationError::MissingSheet {
                key: def.key,
                sheet: def.sheet,
            });
        }
        if let Some(available) = catalog.frame_count(def.sheet) {
            if u32::from(def.last) >= available {
                return Err(AnimationError::FrameOutOfRange {
                    key: def.key,
                    last: def.last,
                    available,
                });
            }
        }

        trace!(key = %def.key, sheet = %def.sheet, frames = def.frame_count(), "Defined animation");
        self.definitions.insert(def.key, def);
        Ok(())
    }

    pub fn get(&self, key: AnimationKey) -> Result<&AnimationDef, AnimationError> {
        self.definitions.get(&key).ok_or(AnimationError::MissingAnimation(key))
    }

    pub fn contains(&self, key: AnimationKey) -> bool {
        self.definitions.contains_key(&key)
    }
}

/// Playback state of one animation on one entity.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct AnimationPlayer {
    def: AnimationDef,
    index: u16,
    plays: u32,
    elapsed: f32,
    finished: bool,
}

impl AnimationPlayer {
    pub fn new(def: AnimationDef) -> Self {
        Self {
            def,
            index: 0,
            plays: 0,
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Switches to another animation, starting from its first frame.
    pub fn play(&mut self, def: AnimationDef) {
        *self = Self::new(def);
    }

    pub fn key(&self) -> AnimationKey {
        self.def.key
    }

    pub fn sheet(&self) -> Asset {
        self.def.sheet
    }

    /// The sprite sheet frame currently shown.
    pub fn frame(&self) -> u16 {
        self.def.first + self.index
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances playback by `dt` seconds.
    ///
    /// # Returns
    ///
    /// `true` on the call during which the animation completes its last play.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.finished {
            return false;
        }

        self.elapsed += dt;
        let frame_duration = self.def.frame_duration();
        while self.elapsed >= frame_duration {
            self.elapsed -= frame_duration;

            if self.index + 1 < self.def.frame_count() {
                self.index += 1;
                continue;
            }

            self.plays += 1;
            match self.def.repeat {
                Repeat::Times(extra) if self.plays > extra => {
                    self.finished = true;
                    return true;
                }
                _ => self.index = 0,
            }
        }

        false
    }
}

/// Sent once when a finite animation has played to the end.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFinished {
    pub entity: Entity,
    pub key: AnimationKey,
}

/// Advances every animation and reports the ones that just completed.
pub fn animation_system(
    delta_time: Res<DeltaTime>,
    mut players: Query<(Entity, &mut AnimationPlayer)>,
    mut finished: EventWriter<AnimationFinished>,
) {
    for (entity, mut player) in players.iter_mut() {
        if player.tick(delta_time.0) {
            debug!(entity = ?entity, key = %player.key(), "Animation finished");
            finished.write(AnimationFinished {
                entity,
                key: player.key(),
            });
        }
    }
}
