use serde::{Deserialize, Serialize};

use crate::types::{Modifier, WindowId};

/// A classified windowing-system notification.
///
/// Produced by the platform probe, consumed exactly once by the controller
/// dispatcher. Payloads carry only what the handlers need: key presses carry
/// the key code plus modifier set, window and state changes carry the window
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// A grabbed hotkey fired.
    KeyPress {
        keycode: u32,
        modifiers: Vec<Modifier>,
    },
    /// The active window changed.
    ActiveChange,
    /// The current desktop changed.
    DesktopChange,
    /// A window was created or destroyed somewhere.
    WindowListChange,
    /// A known window moved, resized, or changed desktops.
    WindowChange(WindowId),
    /// A known window changed state (hidden, maximized, ...).
    StateChange(WindowId),
    /// The usable desktop area changed (panel added/removed, ...).
    WorkareaChange,
    /// Screen topology changed (monitor attached/detached, resolution).
    ScreenChange,
}

impl Event {
    /// The window identifier carried by window/state-change events.
    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            Event::WindowChange(id) | Event::StateChange(id) => Some(*id),
            _ => None,
        }
    }
}
