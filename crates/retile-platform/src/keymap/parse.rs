use retile_common::{Modifier, PlatformError};

use super::types::KeyBind;

/// Parses a human-readable keybind string like `"Super+T"` or
/// `"Ctrl+Shift+Enter"` into a [`KeyBind`].
///
/// Normalization rules:
/// - `"Ctrl"` / `"Control"` -> `Ctrl`
/// - `"Alt"` -> `Alt`
/// - `"Shift"` -> `Shift`
/// - `"Super"` / `"Win"` / `"Meta"` / `"Mod4"` -> `Super`
///
/// The last token that is not a recognized modifier becomes the key.
pub fn parse_keybind(s: &str) -> Result<KeyBind, PlatformError> {
    let tokens: Vec<&str> = s.split('+').map(|t| t.trim()).collect();

    if tokens.is_empty() || (tokens.len() == 1 && tokens[0].is_empty()) {
        return Err(PlatformError::KeyGrabError("empty keybind string".into()));
    }

    let mut modifiers = Vec::new();
    let mut key: Option<String> = None;

    for (i, token) in tokens.iter().enumerate() {
        let is_last = i == tokens.len() - 1;

        match normalize_modifier(token) {
            Some(modifier) if !is_last => {
                if !modifiers.contains(&modifier) {
                    modifiers.push(modifier);
                }
            }
            Some(_) => {
                // A trailing modifier token is treated as the key itself
                // ("Super+Shift" binds Shift under Super).
                key = Some(normalize_key_name(token));
            }
            None => {
                if is_last {
                    key = Some(normalize_key_name(token));
                } else {
                    return Err(PlatformError::KeyGrabError(format!(
                        "unrecognized modifier: {token}"
                    )));
                }
            }
        }
    }

    let key =
        key.ok_or_else(|| PlatformError::KeyGrabError("keybind has no key component".into()))?;

    Ok(KeyBind { modifiers, key })
}

pub(super) fn normalize_modifier(token: &str) -> Option<Modifier> {
    match token.to_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifier::Ctrl),
        "alt" | "mod1" => Some(Modifier::Alt),
        "shift" => Some(Modifier::Shift),
        "super" | "win" | "meta" | "mod4" => Some(Modifier::Super),
        _ => None,
    }
}

pub(super) fn normalize_key_name(token: &str) -> String {
    let lower = token.to_lowercase();
    match lower.as_str() {
        "period" => ".".into(),
        "comma" => ",".into(),
        "slash" => "/".into(),
        "backslash" => "\\".into(),
        "space" => "Space".into(),
        "enter" | "return" => "Enter".into(),
        "escape" | "esc" => "Escape".into(),
        "tab" => "Tab".into(),
        "backspace" => "Backspace".into(),
        "delete" | "del" => "Delete".into(),
        "up" => "Up".into(),
        "down" => "Down".into(),
        "left" => "Left".into(),
        "right" => "Right".into(),
        "home" => "Home".into(),
        "end" => "End".into(),
        "pageup" => "PageUp".into(),
        "pagedown" => "PageDown".into(),
        _ => {
            if token.len() == 1 {
                token.to_uppercase()
            } else {
                let mut chars = lower.chars();
                match chars.next() {
                    Some(c) => {
                        let upper: String = c.to_uppercase().collect();
                        format!("{upper}{}", chars.as_str())
                    }
                    None => lower,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_modifier_and_key() {
        let kb = parse_keybind("Super+T").unwrap();
        assert_eq!(kb.modifiers, vec![Modifier::Super]);
        assert_eq!(kb.key, "T");
    }

    #[test]
    fn multiple_modifiers() {
        let kb = parse_keybind("Ctrl+Shift+Enter").unwrap();
        assert_eq!(kb.modifiers, vec![Modifier::Ctrl, Modifier::Shift]);
        assert_eq!(kb.key, "Enter");
    }

    #[test]
    fn modifier_aliases() {
        assert_eq!(
            parse_keybind("Mod4+J").unwrap().modifiers,
            vec![Modifier::Super]
        );
        assert_eq!(
            parse_keybind("Control+X").unwrap().modifiers,
            vec![Modifier::Ctrl]
        );
    }

    #[test]
    fn named_keys_normalize() {
        assert_eq!(parse_keybind("Super+Comma").unwrap().key, ",");
        assert_eq!(parse_keybind("Super+Period").unwrap().key, ".");
        assert_eq!(parse_keybind("Super+space").unwrap().key, "Space");
        assert_eq!(parse_keybind("Super+pageup").unwrap().key, "PageUp");
    }

    #[test]
    fn whitespace_tolerated() {
        let kb = parse_keybind("Super + Shift + R").unwrap();
        assert_eq!(kb.modifiers, vec![Modifier::Super, Modifier::Shift]);
        assert_eq!(kb.key, "R");
    }

    #[test]
    fn bare_key_has_no_modifiers() {
        let kb = parse_keybind("F11").unwrap();
        assert!(kb.modifiers.is_empty());
        assert_eq!(kb.key, "F11");
    }

    #[test]
    fn empty_string_rejected() {
        assert!(parse_keybind("").is_err());
    }

    #[test]
    fn unknown_middle_modifier_rejected() {
        assert!(parse_keybind("Hyper+T").is_err());
    }

    #[test]
    fn duplicate_modifiers_collapse() {
        let kb = parse_keybind("Super+Super+T").unwrap();
        assert_eq!(kb.modifiers, vec![Modifier::Super]);
    }
}
