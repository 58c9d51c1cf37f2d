//! Keybind section validation.

use std::collections::BTreeMap;
use std::collections::HashMap;

use retile_common::{Action, ConfigError};

/// Validate that every bound command name is known.
pub fn validate_commands(keybinds: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    for (combo, command) in keybinds {
        if Action::from_name(command).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "keybind '{combo}' maps to unknown command '{command}'"
            )));
        }
    }
    Ok(())
}

/// Validate that no two commands claim the same key combination.
///
/// The keybind map is keyed by combo string so literal duplicates cannot
/// exist, but combos that differ only in spelling ("Super + T" vs "Super+T")
/// still collide once normalized.
pub fn validate_no_duplicates(keybinds: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for (combo, command) in keybinds {
        let normalized: String = combo
            .split('+')
            .map(|t| t.trim().to_lowercase())
            .collect::<Vec<_>>()
            .join("+");
        if let Some(existing) = seen.get(&normalized) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate keybind '{combo}': assigned to both '{existing}' and '{command}'"
            )));
        }
        seen.insert(normalized, command);
    }

    Ok(())
}
