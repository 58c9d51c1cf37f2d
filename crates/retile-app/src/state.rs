//! The global state registry.
//!
//! One `State` exists per process, constructed at bootstrap and threaded
//! through every component call. It owns the desktop/viewport/screen
//! hierarchy, the window registry, the active pair, the registered hotkey
//! set, the pending-reload flag, and the pending-retile queue. All lookups
//! between entities go through the id-keyed maps here; entities hold ids,
//! never references to each other.

use std::collections::{HashMap, VecDeque};

use retile_common::{Action, DesktopId, Rect, ScreenId, ViewportId, WindowId};
use retile_platform::KeyCombo;
use retile_tiling::{TileStorage, Tiler};

/// A named workspace containing one or more viewports.
pub struct Desktop {
    pub id: DesktopId,
    pub name: String,
    pub viewports: Vec<ViewportId>,
}

/// A visible region of a desktop bound to physical screens.
pub struct Viewport {
    pub id: ViewportId,
    pub desktop: DesktopId,
    pub rect: Rect,
    pub screens: Vec<ScreenId>,
}

/// A display area with an assigned tiler and the windows it manages.
pub struct Screen {
    pub id: ScreenId,
    pub viewport: ViewportId,
    pub desktop: DesktopId,
    pub rect: Rect,
    /// The tileable region: screen minus panels and struts.
    pub workarea: Rect,
    pub tiler: Box<dyn Tiler>,
    pub storage: TileStorage,
}

/// A managed window. Geometry is refreshed in place; the entry is deleted
/// only after a full re-scan confirms the window no longer exists.
pub struct Window {
    pub id: WindowId,
    pub rect: Rect,
    pub desktop: DesktopId,
    pub hidden: bool,
    pub title: String,
    pub class: String,
    pub screen: Option<ScreenId>,
    /// Geometry at load time, restored on untile.
    pub original: Rect,
}

#[derive(Default)]
pub struct State {
    pub desktops: HashMap<DesktopId, Desktop>,
    pub viewports: HashMap<ViewportId, Viewport>,
    pub screens: HashMap<ScreenId, Screen>,
    pub windows: HashMap<WindowId, Window>,
    active_window: Option<WindowId>,
    active_desktop: Option<DesktopId>,
    hotkeys: HashMap<KeyCombo, Action>,
    needs_reload: bool,
    retile_queue: VecDeque<ScreenId>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Retile queue --

    /// Queue a screen for retiling. Re-queueing a screen already pending is
    /// a no-op; the drainer processes to empty before the next event anyway.
    pub fn enqueue_retile(&mut self, screen: ScreenId) {
        if !self.retile_queue.contains(&screen) {
            self.retile_queue.push_back(screen);
        }
    }

    pub fn dequeue_retile(&mut self) -> Option<ScreenId> {
        self.retile_queue.pop_front()
    }

    pub fn retile_pending(&self) -> bool {
        !self.retile_queue.is_empty()
    }

    // -- Reload flag --

    pub fn request_reload(&mut self) {
        self.needs_reload = true;
    }

    pub fn needs_reload(&self) -> bool {
        self.needs_reload
    }

    pub fn mark_reloaded(&mut self) {
        self.needs_reload = false;
    }

    // -- Active pair --

    pub fn active_window(&self) -> Option<WindowId> {
        self.active_window
    }

    pub fn active_desktop(&self) -> Option<DesktopId> {
        self.active_desktop
    }

    pub fn set_active(&mut self, window: Option<WindowId>, desktop: Option<DesktopId>) {
        self.active_window = window;
        if desktop.is_some() {
            self.active_desktop = desktop;
        }
    }

    /// The screen tiling commands apply to: the active window's screen, or
    /// the first screen of the active desktop when nothing is focused.
    pub fn active_screen(&self) -> Option<ScreenId> {
        if let Some(id) = self.active_window {
            if let Some(screen) = self.windows.get(&id).and_then(|w| w.screen) {
                return Some(screen);
            }
        }
        let desktop = self.desktops.get(&self.active_desktop?)?;
        let viewport = self.viewports.get(desktop.viewports.first()?)?;
        viewport.screens.first().copied()
    }

    /// Locate the screen containing the point on the given desktop.
    pub fn screen_at(&self, desktop: DesktopId, x: i32, y: i32) -> Option<ScreenId> {
        let desktop = self.desktops.get(&desktop)?;
        for viewport_id in &desktop.viewports {
            let viewport = self.viewports.get(viewport_id)?;
            if !viewport.rect.contains(x, y) {
                continue;
            }
            for screen_id in &viewport.screens {
                if let Some(screen) = self.screens.get(screen_id) {
                    if screen.rect.contains(x, y) {
                        return Some(*screen_id);
                    }
                }
            }
        }
        None
    }

    // -- Hotkeys --

    /// Record the fully registered hotkey set. The previous set must have
    /// been unregistered first; partial sets are never stored.
    pub fn set_hotkeys(&mut self, hotkeys: HashMap<KeyCombo, Action>) {
        self.hotkeys = hotkeys;
    }

    pub fn take_hotkeys(&mut self) -> HashMap<KeyCombo, Action> {
        std::mem::take(&mut self.hotkeys)
    }

    pub fn hotkeys(&self) -> &HashMap<KeyCombo, Action> {
        &self.hotkeys
    }

    pub fn action_for(&self, combo: KeyCombo) -> Option<Action> {
        self.hotkeys.get(&combo).copied()
    }

    // -- Wipe --

    /// Drop all desktops, windows, the active pair, and the retile queue.
    /// Registered hotkeys and the reload flag survive; they are not derived
    /// from screen topology.
    pub fn wipe(&mut self) {
        self.desktops.clear();
        self.viewports.clear();
        self.screens.clear();
        self.windows.clear();
        self.active_window = None;
        self.active_desktop = None;
        self.retile_queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retile_common::Modifier;
    use retile_tiling::VerticalTiler;

    fn add_screen(state: &mut State, desktop: u32, screen: u32, rect: Rect) {
        let did = DesktopId(desktop);
        let vid = ViewportId(desktop);
        let sid = ScreenId(screen);
        state
            .desktops
            .entry(did)
            .or_insert_with(|| Desktop {
                id: did,
                name: format!("desktop {desktop}"),
                viewports: vec![vid],
            });
        state
            .viewports
            .entry(vid)
            .or_insert_with(|| Viewport {
                id: vid,
                desktop: did,
                rect: Rect::new(0, 0, 3840, 1080),
                screens: vec![],
            })
            .screens
            .push(sid);
        state.screens.insert(
            sid,
            Screen {
                id: sid,
                viewport: vid,
                desktop: did,
                rect,
                workarea: rect,
                tiler: Box::new(VerticalTiler::default()),
                storage: TileStorage::new(),
            },
        );
    }

    #[test]
    fn enqueue_is_duplicate_safe() {
        let mut state = State::new();
        state.enqueue_retile(ScreenId(0));
        state.enqueue_retile(ScreenId(0));
        state.enqueue_retile(ScreenId(1));
        state.enqueue_retile(ScreenId(0));

        assert_eq!(state.dequeue_retile(), Some(ScreenId(0)));
        assert_eq!(state.dequeue_retile(), Some(ScreenId(1)));
        assert_eq!(state.dequeue_retile(), None);
    }

    #[test]
    fn reload_flag_round_trip() {
        let mut state = State::new();
        assert!(!state.needs_reload());
        state.request_reload();
        assert!(state.needs_reload());
        state.mark_reloaded();
        assert!(!state.needs_reload());
    }

    #[test]
    fn screen_at_finds_correct_screen() {
        let mut state = State::new();
        add_screen(&mut state, 0, 0, Rect::new(0, 0, 1920, 1080));
        add_screen(&mut state, 0, 1, Rect::new(1920, 0, 1920, 1080));

        assert_eq!(state.screen_at(DesktopId(0), 100, 100), Some(ScreenId(0)));
        assert_eq!(state.screen_at(DesktopId(0), 2000, 100), Some(ScreenId(1)));
        assert_eq!(state.screen_at(DesktopId(1), 100, 100), None);
    }

    #[test]
    fn active_screen_falls_back_to_desktop() {
        let mut state = State::new();
        add_screen(&mut state, 0, 0, Rect::new(0, 0, 1920, 1080));
        assert_eq!(state.active_screen(), None);

        state.set_active(None, Some(DesktopId(0)));
        assert_eq!(state.active_screen(), Some(ScreenId(0)));
    }

    #[test]
    fn set_active_keeps_desktop_when_window_clears() {
        let mut state = State::new();
        state.set_active(Some(WindowId(5)), Some(DesktopId(1)));
        state.set_active(None, None);
        assert_eq!(state.active_window(), None);
        assert_eq!(state.active_desktop(), Some(DesktopId(1)));
    }

    #[test]
    fn wipe_preserves_hotkeys_and_reload_flag() {
        let mut state = State::new();
        add_screen(&mut state, 0, 0, Rect::new(0, 0, 1920, 1080));
        state.enqueue_retile(ScreenId(0));
        state.request_reload();

        let combo = KeyCombo::new(28, &[Modifier::Super]);
        let mut hotkeys = HashMap::new();
        hotkeys.insert(combo, Action::Tile);
        state.set_hotkeys(hotkeys);

        state.wipe();
        assert!(state.screens.is_empty());
        assert!(state.windows.is_empty());
        assert!(!state.retile_pending());
        assert_eq!(state.action_for(combo), Some(Action::Tile));
        assert!(state.needs_reload());
    }
}
