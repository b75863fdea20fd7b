use std::collections::{HashMap, HashSet};

use bevy_ecs::{
    event::{Event, EventReader, EventWriter},
    resource::Resource,
    system::{Res, ResMut},
};
use bitflags::bitflags;
use tracing::trace;

use crate::events::{GameCommand, GameEvent};

/// Logical keys the game listens to, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Numpad8,
    Numpad2,
    Numpad4,
    Numpad6,
    Escape,
    Q,
    P,
}

bitflags! {
    /// Movement directions currently held down.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HeldKeys: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
    }
}

/// What a key does: hold a movement direction, or fire a command when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Hold(HeldKeys),
    Command(GameCommand),
}

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Key, Binding>,
}

impl Default for Bindings {
    fn default() -> Self {
        let key_bindings = HashMap::from([
            // Arrow keys and the numpad are interchangeable
            (Key::Up, Binding::Hold(HeldKeys::UP)),
            (Key::Numpad8, Binding::Hold(HeldKeys::UP)),
            (Key::Down, Binding::Hold(HeldKeys::DOWN)),
            (Key::Numpad2, Binding::Hold(HeldKeys::DOWN)),
            (Key::Left, Binding::Hold(HeldKeys::LEFT)),
            (Key::Numpad4, Binding::Hold(HeldKeys::LEFT)),
            (Key::Right, Binding::Hold(HeldKeys::RIGHT)),
            (Key::Numpad6, Binding::Hold(HeldKeys::RIGHT)),
            (Key::P, Binding::Command(GameCommand::TogglePause)),
            (Key::Escape, Binding::Command(GameCommand::Exit)),
            (Key::Q, Binding::Command(GameCommand::Exit)),
        ]);

        Self { key_bindings }
    }
}

impl Bindings {
    pub fn get(&self, key: Key) -> Option<Binding> {
        self.key_bindings.get(&key).copied()
    }
}

/// A key going down or coming back up, as reported by the frontend.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn pressed(key: Key) -> Self {
        Self { key, pressed: true }
    }

    pub fn released(key: Key) -> Self {
        Self { key, pressed: false }
    }
}

/// The set of keys currently held down.
#[derive(Debug, Default, Clone, Resource)]
pub struct KeyboardState {
    held: HashSet<Key>,
}

impl KeyboardState {
    /// Records a key press. Returns `false` if the key was already down.
    pub fn press(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Movement directions held through any bound key.
    pub fn held(&self, bindings: &Bindings) -> HeldKeys {
        self.held
            .iter()
            .filter_map(|key| match bindings.get(*key) {
                Some(Binding::Hold(flags)) => Some(flags),
                _ => None,
            })
            .fold(HeldKeys::empty(), |acc, flags| acc | flags)
    }
}

/// Applies key events to the keyboard state and turns command keys into game events.
pub fn input_system(
    bindings: Res<Bindings>,
    mut keyboard: ResMut<KeyboardState>,
    mut keys: EventReader<KeyEvent>,
    mut writer: EventWriter<GameEvent>,
) {
    for event in keys.read() {
        if !event.pressed {
            keyboard.release(event.key);
            continue;
        }

        // Held keys only fire their command once
        if !keyboard.press(event.key) {
            continue;
        }

        if let Some(Binding::Command(command)) = bindings.get(event.key) {
            trace!(key = ?event.key, ?command, "Key command");
            writer.write(GameEvent::Command(command));
        }
    }
}
