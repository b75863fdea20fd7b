//! Level loading and the ready barrier in front of gameplay.
//!
//! A level file is read on a background thread. Until it arrives the level stays in
//! [`LevelState::Loading`] and no gameplay system runs. A failed load is replaced by an
//! empty maze so the game never waits forever.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use bevy_ecs::resource::Resource;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::LevelError;
use crate::map::layout::MazeLayout;

/// Where the maze comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LevelSource {
    /// The maze compiled into the game.
    #[default]
    Builtin,
    /// A JSON level file read at startup.
    File(PathBuf),
}

/// A level load in flight.
pub struct PendingLevel {
    receiver: Mutex<Receiver<Result<MazeLayout, LevelError>>>,
}

impl PendingLevel {
    /// Starts loading `source`. Built-in levels are delivered immediately.
    pub fn start(source: &LevelSource) -> Self {
        let (sender, receiver) = mpsc::channel();

        match source {
            LevelSource::Builtin => {
                // The receiver is alive, so this cannot fail
                let _ = sender.send(Ok(MazeLayout::builtin()));
            }
            LevelSource::File(path) => {
                let path = path.clone();
                debug!(path = %path.display(), "Spawning level loader thread");
                thread::spawn(move || {
                    let _ = sender.send(read_level(&path));
                });
            }
        }

        Self {
            receiver: Mutex::new(receiver),
        }
    }

    /// Returns the load result once it is available, `None` while still loading.
    pub fn poll(&self) -> Option<Result<MazeLayout, LevelError>> {
        match self.receiver.lock().try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LevelError::Disconnected)),
        }
    }
}

/// Reads and parses a level file.
pub fn read_level(path: &Path) -> Result<MazeLayout, LevelError> {
    let text = std::fs::read_to_string(path)?;
    MazeLayout::from_json(&text)
}

/// Load state of the current level.
#[derive(Resource)]
pub enum LevelState {
    Loading(PendingLevel),
    Ready(MazeLayout),
}

impl LevelState {
    pub fn load(source: &LevelSource) -> Self {
        info!(source = ?source, "Loading level");
        LevelState::Loading(PendingLevel::start(source))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LevelState::Ready(_))
    }

    pub fn layout(&self) -> Option<&MazeLayout> {
        match self {
            LevelState::Ready(layout) => Some(layout),
            LevelState::Loading(_) => None,
        }
    }

    /// Moves to [`LevelState::Ready`] if the pending load has finished.
    ///
    /// # Returns
    ///
    /// `true` on the call that completes the load, `false` otherwise.
    pub fn poll(&mut self) -> bool {
        let LevelState::Loading(pending) = self else {
            return false;
        };

        let layout = match pending.poll() {
            None => return false,
            Some(Ok(layout)) => {
                info!(walls = layout.len(), "Level loaded");
                layout
            }
            Some(Err(error)) => {
                warn!(%error, "Level failed to load, continuing with an empty maze");
                MazeLayout::empty()
            }
        };

        *self = LevelState::Ready(layout);
        true
    }
}

/// Run condition: gameplay only runs once the maze exists.
pub fn level_ready(level: bevy_ecs::system::Res<LevelState>) -> bool {
    level.is_ready()
}
