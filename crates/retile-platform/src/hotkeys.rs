//! Hotkey bindings: parsed keybinds mapped to actions, and the canonical
//! key-combination form used for grab registration and event lookup.

use std::collections::BTreeMap;

use retile_common::{Action, Modifier};
use tracing::warn;

use crate::keymap::{keybind_to_display, parse_keybind, KeyBind};

pub(crate) const MOD_CTRL: u8 = 0b0001;
pub(crate) const MOD_ALT: u8 = 0b0010;
pub(crate) const MOD_SHIFT: u8 = 0b0100;
pub(crate) const MOD_SUPER: u8 = 0b1000;

/// A canonical key representation for fast HashMap lookup.
///
/// Modifiers are stored as a bitmask so comparing an incoming key press
/// against registered hotkeys is O(1) rather than sorting a `Vec<Modifier>`
/// on every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// Bitmask: Ctrl=1, Alt=2, Shift=4, Super=8.
    pub mods: u8,
    /// Key code as reported by the windowing system.
    pub keycode: u32,
}

impl KeyCombo {
    /// Build from a resolved keycode and a modifier set.
    pub fn new(keycode: u32, modifiers: &[Modifier]) -> Self {
        let mut mods = 0u8;
        for m in modifiers {
            mods |= match m {
                Modifier::Ctrl => MOD_CTRL,
                Modifier::Alt => MOD_ALT,
                Modifier::Shift => MOD_SHIFT,
                Modifier::Super => MOD_SUPER,
            };
        }
        Self { mods, keycode }
    }
}

/// Maps parsed key bindings to [`Action`]s.
///
/// Built from the config keybind section at startup and rebuilt on every
/// reload cycle. Invalid keybind strings and unknown command names are
/// logged as warnings and skipped; one bad line never discards the rest.
pub struct HotkeyMap {
    bindings: Vec<(KeyBind, Action)>,
}

impl HotkeyMap {
    /// A map with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Build the map from the config keybind section.
    pub fn from_config(keybinds: &BTreeMap<String, String>) -> Self {
        let mut bindings = Vec::new();

        for (combo, command) in keybinds {
            let kb = match parse_keybind(combo) {
                Ok(kb) => kb,
                Err(e) => {
                    warn!("invalid keybind '{combo}': {e}");
                    continue;
                }
            };
            let Some(action) = Action::from_name(command) else {
                warn!("keybind '{combo}' maps to unknown command '{command}'");
                continue;
            };
            bindings.push((kb, action));
        }

        Self { bindings }
    }

    /// All parsed bindings, in config order.
    pub fn bindings(&self) -> &[(KeyBind, Action)] {
        &self.bindings
    }

    /// Find the display string for a given action's keybind (reverse lookup).
    pub fn keybind_for_action(&self, action: Action) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, a)| *a == action)
            .map(|(kb, _)| keybind_to_display(kb))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
