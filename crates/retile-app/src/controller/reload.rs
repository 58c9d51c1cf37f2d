//! Config reload: re-read the file, swap the tiler registry and hotkey
//! grabs, and rebuild the desktop hierarchy while keeping known windows.

use std::collections::HashMap;

use retile_common::{Action, Result};
use retile_platform::{HotkeyMap, KeyCombo};
use retile_tiling::TilerRegistry;
use tracing::{info, warn};

use super::Controller;
use crate::sync;

impl Controller {
    /// Apply a pending reload request, if any. Reload failures are fatal:
    /// a half-applied config (old grabs gone, new grabs absent) is worse
    /// than exiting with a clear error.
    pub(super) fn check_reload(&mut self) -> Result<()> {
        if !self.state.needs_reload() {
            return Ok(());
        }

        info!("reloading config");
        self.config = self.load_config()?;
        self.registry = TilerRegistry::from_names(&self.config.tilers.enabled)?;

        self.unregister_hotkeys()?;
        self.hotkey_map = HotkeyMap::from_config(&self.config.keybinds);
        self.register_hotkeys()?;

        sync::reload_desktops(
            &mut self.state,
            self.probe.as_ref(),
            &self.registry,
            &self.config.tilers.default,
        )?;

        self.state.mark_reloaded();
        info!(keybinds = self.hotkey_map.len(), "config reloaded");
        Ok(())
    }

    /// Grab every binding in the hotkey map, all or nothing. On failure the
    /// grabs made so far are released before returning the error.
    pub(super) fn register_hotkeys(&mut self) -> Result<()> {
        let mut resolved: HashMap<KeyCombo, Action> = HashMap::new();

        for (bind, action) in self.hotkey_map.bindings() {
            let keycode = match self.probe.resolve_key(&bind.key) {
                Ok(keycode) => keycode,
                Err(e) => {
                    self.release_combos(resolved.keys().copied());
                    return Err(e.into());
                }
            };
            let combo = KeyCombo::new(keycode, &bind.modifiers);
            if let Err(e) = self.probe.grab_key(combo) {
                self.release_combos(resolved.keys().copied());
                return Err(e.into());
            }
            resolved.insert(combo, *action);
        }

        self.state.set_hotkeys(resolved);
        Ok(())
    }

    /// Release every currently grabbed combination.
    pub(super) fn unregister_hotkeys(&mut self) -> Result<()> {
        for (combo, _) in self.state.take_hotkeys() {
            self.probe.ungrab_key(combo)?;
        }
        Ok(())
    }

    fn release_combos(&self, combos: impl Iterator<Item = KeyCombo>) {
        for combo in combos {
            if let Err(e) = self.probe.ungrab_key(combo) {
                warn!("failed to release key grab: {e}");
            }
        }
    }
}
