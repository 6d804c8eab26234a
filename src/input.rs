/// Live keyboard state fed by key-down / key-up events.
///
/// Keys are identified by the same names a browser-style key event uses
/// (`"ArrowLeft"`, `"Space"`, `"7"` …); anything else is ignored.

use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    /// Debug: raise attack power.
    AttackUp,
    /// Debug: lower attack power.
    AttackDown,
}

impl Key {
    pub fn from_identifier(id: &str) -> Option<Key> {
        match id {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "Space" | " " => Some(Key::Fire),
            "7" => Some(Key::AttackUp),
            "6" => Some(Key::AttackDown),
            _ => None,
        }
    }
}

/// One-shot actions triggered by a key transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Fire,
    /// Signed change to attack power.
    AdjustAttack(i32),
}

pub const DEBUG_ATTACK_STEP: i32 = 10;

#[derive(Clone, Debug, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
    /// Set while the fire key is down so OS key-repeat cannot re-fire.
    fire_lock: bool,
}

impl InputState {
    /// Record a key press and return the command it triggers, if any.
    /// Fire only triggers on the released → pressed transition.
    pub fn key_down(&mut self, key: Key) -> Option<Command> {
        self.pressed.insert(key);
        match key {
            Key::Fire if !self.fire_lock => {
                self.fire_lock = true;
                Some(Command::Fire)
            }
            Key::AttackUp => Some(Command::AdjustAttack(DEBUG_ATTACK_STEP)),
            Key::AttackDown => Some(Command::AdjustAttack(-DEBUG_ATTACK_STEP)),
            _ => None,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.pressed.remove(&key);
        if key == Key::Fire {
            self.fire_lock = false;
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn fire_held(&self) -> bool {
        self.is_pressed(Key::Fire)
    }
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key counts as released once no press/repeat event has been seen for
/// this long.  Must exceed the OS initial key-repeat delay or holding a key
/// would stutter.
pub const HOLD_WINDOW_MS: u64 = 550;

/// Bridges terminal key events to `InputState`.
///
/// Most terminals never report key releases, only presses and auto-repeats,
/// so every held key carries the time it was last seen and is released by
/// `expire` once that goes stale.  Terminals that do report releases clear
/// keys immediately through `release`.
#[derive(Clone, Debug, Default)]
pub struct HeldKeys {
    last_seen: HashMap<Key, u64>,
}

impl HeldKeys {
    /// Press or auto-repeat of `key` at `now`.
    pub fn press(&mut self, input: &mut InputState, key: Key, now: u64) -> Option<Command> {
        self.last_seen.insert(key, now);
        input.key_down(key)
    }

    pub fn release(&mut self, input: &mut InputState, key: Key) {
        self.last_seen.remove(&key);
        input.key_up(key);
    }

    /// Release every key not seen within `HOLD_WINDOW_MS` of `now`.
    pub fn expire(&mut self, input: &mut InputState, now: u64) {
        self.last_seen.retain(|&key, &mut last| {
            let live = now.saturating_sub(last) <= HOLD_WINDOW_MS;
            if !live {
                input.key_up(key);
            }
            live
        });
    }
}
