//! Typed configuration schema.
//!
//! Every section and field has a serde default so partial configs work.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetileConfig {
    pub general: GeneralConfig,
    pub tilers: TilersConfig,
    /// Keybind string -> command name (see `Action::from_name`).
    pub keybinds: BTreeMap<String, String>,
    /// Window-class substrings that are never managed.
    pub filters: Vec<String>,
}

impl Default for RetileConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            tilers: TilersConfig::default(),
            keybinds: default_keybinds(),
            filters: default_filters(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Settle delay in seconds, applied after bursty notifications.
    pub timeout: f64,
    /// Delay in seconds before rebuilding state after a screen topology
    /// change. Deliberately longer than `timeout`; topology changes are
    /// disruptive and the system takes a while to stabilize.
    pub screen_change_delay: f64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            timeout: 0.2,
            screen_change_delay: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilersConfig {
    /// Tiler assigned to every screen until changed at runtime.
    pub default: String,
    /// Tilers available to screens. Unknown names fail validation.
    pub enabled: Vec<String>,
}

impl Default for TilersConfig {
    fn default() -> Self {
        Self {
            default: "vertical".into(),
            enabled: vec!["vertical".into(), "horizontal".into()],
        }
    }
}

fn default_keybinds() -> BTreeMap<String, String> {
    let binds = [
        ("Super+T", "tile"),
        ("Super+U", "untile"),
        ("Super+J", "focus_next"),
        ("Super+K", "focus_previous"),
        ("Super+Enter", "promote_master"),
        ("Super+L", "master_grow"),
        ("Super+H", "master_shrink"),
        ("Super+Comma", "add_master"),
        ("Super+Period", "remove_master"),
        ("Super+Shift+R", "reload"),
        ("Super+Shift+Q", "quit"),
    ];
    binds
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn default_filters() -> Vec<String> {
    vec!["gmrun".into()]
}
