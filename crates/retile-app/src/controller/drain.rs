//! Retile queue draining: apply each queued screen's layout before the
//! loop blocks on the next event.

use retile_common::{Result, ScreenId};
use tracing::debug;

use super::Controller;

impl Controller {
    /// Apply layouts for every queued screen. Tiling errors are fatal: a
    /// layout failure means the registry and the windowing system disagree
    /// about geometry in a way no handler can repair.
    pub(super) fn drain_retile_queue(&mut self) -> Result<()> {
        let was_pending = self.state.retile_pending();

        while let Some(screen) = self.state.dequeue_retile() {
            self.tile_screen(screen)?;
        }

        if was_pending {
            self.settle();
        }
        Ok(())
    }

    /// Compute and apply the layout of one screen.
    pub(super) fn tile_screen(&mut self, id: ScreenId) -> Result<()> {
        let placements = {
            let Some(screen) = self.state.screens.get(&id) else {
                return Ok(());
            };
            screen.tiler.layout(screen.workarea, &screen.storage)
        };

        debug!(screen = id.0, windows = placements.len(), "tiling screen");

        for placement in placements {
            self.probe.move_resize(placement.window, placement.rect)?;
            if let Some(window) = self.state.windows.get_mut(&placement.window) {
                window.rect = placement.rect;
            }
        }
        Ok(())
    }
}
