use retile_common::Modifier;

use super::types::KeyBind;

/// Converts a [`KeyBind`] back into a display string for log messages.
pub fn keybind_to_display(kb: &KeyBind) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for modifier in &kb.modifiers {
        parts.push(match modifier {
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
            Modifier::Super => "Super",
        });
    }

    parts.push(&kb.key);
    parts.join("+")
}
