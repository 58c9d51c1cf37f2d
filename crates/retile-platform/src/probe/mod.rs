//! The windowing-system probe: everything the controller needs from the
//! underlying display server, behind one trait.

pub mod noop;

use retile_common::{DesktopId, Event, PlatformError, Rect, ScreenId, ViewportId, WindowId};

use crate::hotkeys::KeyCombo;

pub type Result<T> = std::result::Result<T, PlatformError>;

/// A snapshot of one window's attributes as reported by the display server.
#[derive(Debug, Clone)]
pub struct WindowAttrs {
    pub id: WindowId,
    pub rect: Rect,
    pub desktop: DesktopId,
    pub title: String,
    /// Window class, used by the config filter list.
    pub class: String,
    pub hidden: bool,
    /// Transient/override-redirect windows (menus, tooltips) are never tiled.
    pub popup: bool,
}

#[derive(Debug, Clone)]
pub struct ScreenAttrs {
    pub id: ScreenId,
    pub rect: Rect,
    /// The tileable region: screen minus panels and struts.
    pub workarea: Rect,
}

#[derive(Debug, Clone)]
pub struct ViewportAttrs {
    pub id: ViewportId,
    pub rect: Rect,
    pub screens: Vec<ScreenAttrs>,
}

#[derive(Debug, Clone)]
pub struct DesktopAttrs {
    pub id: DesktopId,
    pub name: String,
    pub viewports: Vec<ViewportAttrs>,
}

/// Connection to the windowing system.
///
/// The controller is written entirely against this trait: the real backend
/// speaks the display-server protocol, tests use a scripted fake, and
/// unsupported platforms fall back to [`noop::NoopProbe`].
pub trait Probe {
    /// Whether a supporting (EWMH-compliant) window manager is active.
    /// Polled at startup only.
    fn is_running(&self) -> bool;

    /// Block until the next classified event arrives.
    ///
    /// This is the only call that may block indefinitely. An error here
    /// means the event source is gone and is fatal to the controller.
    fn next_event(&self) -> Result<Event>;

    /// Enumerate every window that currently exists, managed or not.
    fn list_window_ids(&self) -> Result<Vec<WindowId>>;

    /// Fetch a fresh snapshot of one window's attributes.
    fn window_attrs(&self, id: WindowId) -> Result<WindowAttrs>;

    /// The currently focused window, if any.
    fn active_window_id(&self) -> Result<Option<WindowId>>;

    /// Enumerate desktops with their viewports, screens, and workareas.
    fn desktop_layout(&self) -> Result<Vec<DesktopAttrs>>;

    /// Move and resize a window.
    fn move_resize(&self, id: WindowId, rect: Rect) -> Result<()>;

    /// Give a window the input focus.
    fn activate(&self, id: WindowId) -> Result<()>;

    /// Resolve a symbolic key name ("T", "Enter") to a key code.
    fn resolve_key(&self, name: &str) -> Result<u32>;

    /// Grab a key combination globally.
    fn grab_key(&self, combo: KeyCombo) -> Result<()>;

    /// Release a previously grabbed key combination.
    fn ungrab_key(&self, combo: KeyCombo) -> Result<()>;
}

/// Create the platform-appropriate probe.
///
/// No display-server backend is wired up yet, so this currently always
/// returns the no-op probe.
// TODO: add an X11 backend (EWMH + XGrabKey) and select it here on Linux.
pub fn create_probe() -> Box<dyn Probe> {
    Box::new(noop::NoopProbe)
}
