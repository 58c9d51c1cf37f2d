use serde::{Deserialize, Serialize};

use retile_common::Modifier;

/// A key binding consisting of zero or more modifiers and a key name.
///
/// The key name is symbolic ("T", "Enter", "F1"); the probe resolves it to
/// a key code at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBind {
    pub modifiers: Vec<Modifier>,
    pub key: String,
}
