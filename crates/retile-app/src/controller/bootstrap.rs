//! Startup sequencing: wait for the window manager, load config, then
//! build the initial state registry.

use retile_common::Result;
use retile_config::RetileConfig;
use retile_platform::HotkeyMap;
use retile_tiling::TilerRegistry;
use tracing::{debug, info};

use super::{Controller, WM_POLL_INTERVAL};
use crate::sync;

impl Controller {
    /// One-shot startup. Any error here is fatal: without a window manager,
    /// a valid tiler set, or the initial hotkey grabs there is nothing to
    /// run.
    pub(super) fn bootstrap(&mut self) -> Result<()> {
        self.await_window_manager();
        if self.shutdown.load(std::sync::atomic::Ordering::SeqCst) {
            return Ok(());
        }

        self.config = self.load_config()?;
        // The settle delay itself comes from config, so config loads first.
        self.settle();

        self.registry = TilerRegistry::from_names(&self.config.tilers.enabled)?;
        self.hotkey_map = HotkeyMap::from_config(&self.config.keybinds);
        self.register_hotkeys()?;

        sync::load_desktops(
            &mut self.state,
            self.probe.as_ref(),
            &self.registry,
            &self.config.tilers.default,
        )?;
        sync::load_new_windows(&mut self.state, self.probe.as_ref(), &self.config.filters)?;
        sync::reload_active(&mut self.state, self.probe.as_ref(), false)?;

        info!(
            desktops = self.state.desktops.len(),
            screens = self.state.screens.len(),
            windows = self.state.windows.len(),
            "bootstrap complete"
        );
        Ok(())
    }

    /// Block until the window manager reports itself running, polling at a
    /// fixed interval. Interruptible via the shutdown flag.
    fn await_window_manager(&self) {
        let mut waited = false;
        while !self.probe.is_running() {
            if self.shutdown.load(std::sync::atomic::Ordering::SeqCst) {
                return;
            }
            if !waited {
                info!("waiting for a window manager");
                waited = true;
            }
            std::thread::sleep(WM_POLL_INTERVAL);
        }
        if waited {
            info!("window manager detected");
        }
    }

    pub(super) fn load_config(&self) -> Result<RetileConfig> {
        let config = retile_config::load_config(self.config_path.as_deref())?;
        debug!(
            default_tiler = %config.tilers.default,
            keybinds = config.keybinds.len(),
            "config loaded"
        );
        Ok(config)
    }
}
