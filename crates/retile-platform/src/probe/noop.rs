//! No-op probe implementation.
//!
//! Used as a fallback on platforms without a display-server backend. All
//! queries return empty results, `is_running` reports no window manager,
//! and the event source reports itself unsupported.

use retile_common::{Event, PlatformError, Rect, WindowId};

use crate::hotkeys::KeyCombo;

use super::{DesktopAttrs, Probe, Result, WindowAttrs};

pub struct NoopProbe;

impl Probe for NoopProbe {
    fn is_running(&self) -> bool {
        false
    }

    fn next_event(&self) -> Result<Event> {
        Err(PlatformError::NotSupported(
            "no display-server backend on this platform".into(),
        ))
    }

    fn list_window_ids(&self) -> Result<Vec<WindowId>> {
        Ok(Vec::new())
    }

    fn window_attrs(&self, id: WindowId) -> Result<WindowAttrs> {
        Err(PlatformError::WindowGone(id.0))
    }

    fn active_window_id(&self) -> Result<Option<WindowId>> {
        Ok(None)
    }

    fn desktop_layout(&self) -> Result<Vec<DesktopAttrs>> {
        Ok(Vec::new())
    }

    fn move_resize(&self, _id: WindowId, _rect: Rect) -> Result<()> {
        Ok(())
    }

    fn activate(&self, _id: WindowId) -> Result<()> {
        Ok(())
    }

    fn resolve_key(&self, name: &str) -> Result<u32> {
        Err(PlatformError::NotSupported(format!(
            "cannot resolve key '{name}' without a backend"
        )))
    }

    fn grab_key(&self, _combo: KeyCombo) -> Result<()> {
        Ok(())
    }

    fn ungrab_key(&self, _combo: KeyCombo) -> Result<()> {
        Ok(())
    }
}
