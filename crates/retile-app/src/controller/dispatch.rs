//! Event dispatch and action execution.
//!
//! Faults in keypress handling and in membership/geometry refreshes are
//! contained here: the window in question may simply have vanished, so the
//! handler logs and the loop continues. Faults while following the active
//! window or the desktop hierarchy escape as fatal, because losing track of
//! the focus baseline corrupts every subsequent decision.

use retile_common::{Action, Event, Result, WindowId};
use retile_platform::KeyCombo;
use retile_tiling::TilingCommand;
use tracing::{debug, info, warn};

use super::Controller;
use crate::sync;

impl Controller {
    pub(super) fn dispatch_event(&mut self, event: Event) -> Result<()> {
        debug!(?event, "event");

        match event {
            Event::KeyPress { keycode, modifiers } => {
                if let Err(e) = self.handle_keypress(keycode, &modifiers) {
                    warn!("keypress handler failed: {e}");
                }
            }
            Event::ActiveChange => {
                sync::reload_active(&mut self.state, self.probe.as_ref(), false)?;
            }
            Event::DesktopChange => {
                self.settle();
                sync::reload_active(&mut self.state, self.probe.as_ref(), true)?;
            }
            Event::WindowListChange => {
                self.settle();
                if let Err(e) =
                    sync::load_new_windows(&mut self.state, self.probe.as_ref(), &self.config.filters)
                {
                    warn!("loading new windows failed: {e}");
                }
                if let Err(e) = sync::prune_dead_windows(&mut self.state, self.probe.as_ref()) {
                    warn!("pruning dead windows failed: {e}");
                }
            }
            Event::WindowChange(id) | Event::StateChange(id) => {
                if self.state.windows.contains_key(&id) {
                    if let Err(e) = sync::refresh_window(&mut self.state, self.probe.as_ref(), id) {
                        warn!(window = %id, "window refresh failed: {e}");
                    }
                } else {
                    debug!(window = %id, "change for unknown window");
                }
            }
            Event::WorkareaChange => {
                self.settle();
                if let Err(e) = sync::refresh_desktops(&mut self.state, self.probe.as_ref()) {
                    warn!("workarea refresh failed: {e}");
                }
            }
            Event::ScreenChange => {
                info!("screen topology changed, wiping state");
                self.sleep_secs(self.config.general.screen_change_delay);
                if let Err(e) = self.rebuild_all() {
                    warn!("rebuild after screen change failed: {e}");
                }
            }
        }
        Ok(())
    }

    fn handle_keypress(&mut self, keycode: u32, modifiers: &[retile_common::Modifier]) -> Result<()> {
        let combo = KeyCombo::new(keycode, modifiers);
        let Some(action) = self.state.action_for(combo) else {
            debug!(keycode, "keypress with no binding");
            return Ok(());
        };
        debug!(?action, "executing action");
        self.dispatch_action(action)
    }

    fn dispatch_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Tile => {
                if let Some(screen) = self.state.active_screen() {
                    self.state.enqueue_retile(screen);
                }
            }
            Action::Untile => self.untile_active_screen()?,
            Action::PromoteMaster => {
                if let Some(active) = self.state.active_window() {
                    self.exec_on_active_screen(TilingCommand::PromoteMaster(active));
                }
            }
            Action::MasterGrow => self.exec_on_active_screen(TilingCommand::MasterGrow),
            Action::MasterShrink => self.exec_on_active_screen(TilingCommand::MasterShrink),
            Action::AddMaster => self.exec_on_active_screen(TilingCommand::AddMaster),
            Action::RemoveMaster => self.exec_on_active_screen(TilingCommand::RemoveMaster),
            Action::FocusNext => self.cycle_focus(true)?,
            Action::FocusPrev => self.cycle_focus(false)?,
            Action::ReloadConfig => self.state.request_reload(),
            Action::Quit => {
                self.shutdown.store(true, std::sync::atomic::Ordering::SeqCst);
            }
        }
        Ok(())
    }

    /// Run a layout command against the active screen's tiler, queueing a
    /// retile if the command changed anything.
    fn exec_on_active_screen(&mut self, cmd: TilingCommand) {
        let Some(id) = self.state.active_screen() else {
            return;
        };
        let retile = {
            let Some(screen) = self.state.screens.get_mut(&id) else {
                return;
            };
            screen.tiler.execute(cmd, &mut screen.storage)
        };
        if retile {
            self.state.enqueue_retile(id);
        }
    }

    /// Move every window on the active screen back to the geometry it had
    /// when first tracked. Membership is kept, so a later tile action
    /// restores the layout.
    fn untile_active_screen(&mut self) -> Result<()> {
        let Some(id) = self.state.active_screen() else {
            return Ok(());
        };
        let targets: Vec<(WindowId, retile_common::Rect)> = {
            let Some(screen) = self.state.screens.get(&id) else {
                return Ok(());
            };
            screen
                .storage
                .all()
                .into_iter()
                .filter_map(|w| self.state.windows.get(&w).map(|win| (w, win.original)))
                .collect()
        };

        debug!(screen = id.0, windows = targets.len(), "untiling screen");

        for (window, original) in targets {
            self.probe.move_resize(window, original)?;
            if let Some(win) = self.state.windows.get_mut(&window) {
                win.rect = original;
            }
        }
        Ok(())
    }

    /// Activate the next or previous window in the active screen's order.
    fn cycle_focus(&mut self, forward: bool) -> Result<()> {
        let Some(active) = self.state.active_window() else {
            return Ok(());
        };
        let Some(screen) = self.state.active_screen() else {
            return Ok(());
        };
        let next = {
            let Some(screen) = self.state.screens.get(&screen) else {
                return Ok(());
            };
            if forward {
                screen.storage.next_of(active)
            } else {
                screen.storage.prev_of(active)
            }
        };

        if let Some(next) = next {
            if next != active {
                self.probe.activate(next)?;
            }
        }
        Ok(())
    }

    /// Throw everything away and rebuild from the windowing system. Used
    /// when the screen topology changes under us.
    pub(super) fn rebuild_all(&mut self) -> Result<()> {
        self.state.wipe();
        sync::load_desktops(
            &mut self.state,
            self.probe.as_ref(),
            &self.registry,
            &self.config.tilers.default,
        )?;
        sync::load_new_windows(&mut self.state, self.probe.as_ref(), &self.config.filters)?;
        sync::reload_active(&mut self.state, self.probe.as_ref(), false)?;
        Ok(())
    }
}
