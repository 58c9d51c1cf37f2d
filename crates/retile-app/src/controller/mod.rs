//! The controller: bootstrap, reload scheduling, retile draining, and
//! event dispatch, driven by one single-threaded loop.
//!
//! Control flow is bootstrap, then forever: reload check, drain the retile
//! queue, block for the next event, dispatch it. The loop itself serializes
//! every mutation of the state registry; the only cross-thread state is the
//! interrupt flag.

mod bootstrap;
mod dispatch;
mod drain;
mod reload;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use retile_common::Result;
use retile_config::RetileConfig;
use retile_platform::{HotkeyMap, Probe};
use retile_tiling::TilerRegistry;
use tracing::info;

use crate::state::State;

pub struct Controller {
    probe: Box<dyn Probe>,
    config: RetileConfig,
    config_path: Option<PathBuf>,
    registry: TilerRegistry,
    hotkey_map: HotkeyMap,
    state: State,
    shutdown: Arc<AtomicBool>,
}

impl Controller {
    pub fn new(probe: Box<dyn Probe>, config_path: Option<PathBuf>, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            probe,
            config: RetileConfig::default(),
            config_path,
            registry: TilerRegistry::builtin(),
            hotkey_map: HotkeyMap::empty(),
            state: State::new(),
            shutdown,
        }
    }

    /// Run the controller until interrupted or a fatal error occurs.
    ///
    /// Recoverable handler failures are contained inside
    /// [`Controller::dispatch_event`]; anything that escapes here indicates
    /// a structural inconsistency and terminates the process.
    pub fn run(&mut self) -> Result<()> {
        self.bootstrap()?;

        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                info!("shutting down");
                return Ok(());
            }

            self.check_reload()?;
            self.drain_retile_queue()?;

            let event = self.probe.next_event()?;
            self.dispatch_event(event)?;
        }
    }

    /// Pause for the configured settle delay.
    ///
    /// Windowing-system notifications frequently arrive before the system
    /// has finished updating geometry or membership; a fixed delay avoids
    /// acting on stale data without a confirmation protocol.
    pub(super) fn settle(&self) {
        self.sleep_secs(self.config.general.timeout);
    }

    pub(super) fn sleep_secs(&self, secs: f64) {
        if secs > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(secs));
        }
    }
}

pub(super) const WM_POLL_INTERVAL: Duration = Duration::from_secs(1);
