use serde::{Deserialize, Serialize};

/// Every user-triggerable tiling command.
///
/// Keybind strings in the config resolve to an `Action` by name; the
/// controller dispatcher matches on this enum to route to the active
/// screen's tiler or to the controller itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // -- Layout --
    Tile,
    Untile,
    PromoteMaster,
    MasterGrow,
    MasterShrink,
    AddMaster,
    RemoveMaster,

    // -- Focus --
    FocusNext,
    FocusPrev,

    // -- Controller --
    ReloadConfig,
    Quit,
}

impl Action {
    /// Resolve a config command name to an action.
    ///
    /// Returns `None` for unknown names so callers can warn and skip the
    /// binding instead of failing the whole config.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tile" => Some(Action::Tile),
            "untile" => Some(Action::Untile),
            "promote_master" => Some(Action::PromoteMaster),
            "master_grow" => Some(Action::MasterGrow),
            "master_shrink" => Some(Action::MasterShrink),
            "add_master" => Some(Action::AddMaster),
            "remove_master" => Some(Action::RemoveMaster),
            "focus_next" => Some(Action::FocusNext),
            "focus_previous" => Some(Action::FocusPrev),
            "reload" => Some(Action::ReloadConfig),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve() {
        assert_eq!(Action::from_name("tile"), Some(Action::Tile));
        assert_eq!(Action::from_name("untile"), Some(Action::Untile));
        assert_eq!(Action::from_name("focus_next"), Some(Action::FocusNext));
        assert_eq!(Action::from_name("focus_previous"), Some(Action::FocusPrev));
        assert_eq!(Action::from_name("promote_master"), Some(Action::PromoteMaster));
        assert_eq!(Action::from_name("master_grow"), Some(Action::MasterGrow));
        assert_eq!(Action::from_name("master_shrink"), Some(Action::MasterShrink));
        assert_eq!(Action::from_name("add_master"), Some(Action::AddMaster));
        assert_eq!(Action::from_name("remove_master"), Some(Action::RemoveMaster));
        assert_eq!(Action::from_name("reload"), Some(Action::ReloadConfig));
        assert_eq!(Action::from_name("quit"), Some(Action::Quit));
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(Action::from_name("make_coffee"), None);
        assert_eq!(Action::from_name(""), None);
        assert_eq!(Action::from_name("Tile"), None); // names are lowercase
    }
}
