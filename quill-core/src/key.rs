//! Keyboard input passed to key-binding and event hooks.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct KeyModifiers: u8 {
        /// Shift.
        const SHIFT = 1;
        /// Control.
        const CTRL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command.
        const META = 1 << 3;
    }
}

/// A single key press as reported by the editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The key value, e.g. `"b"`, `"Enter"`, `"Backspace"`.
    pub key: String,
    /// Modifiers held during the press.
    #[serde(default)]
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// A key press without modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: KeyModifiers::empty(),
        }
    }

    /// Replace the held modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// A key press with `Ctrl` held.
    pub fn ctrl(key: impl Into<String>) -> Self {
        Self::new(key).with_modifiers(KeyModifiers::CTRL)
    }

    /// A key press with `Meta` held.
    pub fn meta(key: impl Into<String>) -> Self {
        Self::new(key).with_modifiers(KeyModifiers::META)
    }

    /// Whether the platform command modifier (`Ctrl` or `Meta`) is held.
    pub fn has_command_modifier(&self) -> bool {
        self.modifiers
            .intersects(KeyModifiers::CTRL | KeyModifiers::META)
    }

    /// Whether `Alt` is held.
    pub fn is_option_key(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    /// Whether `Shift` is held.
    pub fn is_shift(&self) -> bool {
        self.modifiers.contains(KeyModifiers::SHIFT)
    }

    /// Whether this press is the given key, ignoring ASCII case.
    pub fn is(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }
}
