use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use retile_common::{
    DesktopId, Event, Modifier, PlatformError, Rect, ScreenId, ViewportId, WindowId,
};
use retile_config::RetileConfig;
use retile_platform::{
    DesktopAttrs, HotkeyMap, KeyCombo, Probe, ScreenAttrs, ViewportAttrs, WindowAttrs,
};
use retile_tiling::TilerRegistry;

use super::Controller;
use crate::state::State;

/// A scripted windowing system. Queries report the configured layout and
/// window set; `next_event` pops from the event script and reports the
/// source disconnected when the script runs out.
#[derive(Default)]
struct FakeProbe {
    running: Cell<bool>,
    events: RefCell<VecDeque<Event>>,
    windows: RefCell<HashMap<WindowId, WindowAttrs>>,
    layout: RefCell<Vec<DesktopAttrs>>,
    active: Cell<Option<WindowId>>,
    grabbed: RefCell<Vec<KeyCombo>>,
    placements: RefCell<Vec<(WindowId, Rect)>>,
    activations: RefCell<Vec<WindowId>>,
    fail_activate: Cell<bool>,
    fail_window_attrs: Cell<bool>,
}

impl FakeProbe {
    fn new() -> Rc<Self> {
        let probe = Rc::new(Self::default());
        probe.running.set(true);
        probe.layout.replace(single_screen_layout());
        probe
    }

    fn push_event(&self, event: Event) {
        self.events.borrow_mut().push_back(event);
    }

    fn add_window(&self, id: u64, x: i32, y: i32) {
        self.windows.borrow_mut().insert(
            WindowId(id),
            WindowAttrs {
                id: WindowId(id),
                rect: Rect::new(x, y, 500, 400),
                desktop: DesktopId(0),
                title: format!("window {id}"),
                class: "xterm".into(),
                hidden: false,
                popup: false,
            },
        );
    }

    fn remove_window(&self, id: u64) {
        self.windows.borrow_mut().remove(&WindowId(id));
    }
}

/// Local handle so `Probe` can be implemented for a shared `FakeProbe`
/// without violating the orphan rule (`Rc` is not a fundamental type).
struct ProbeHandle(Rc<FakeProbe>);

impl std::ops::Deref for ProbeHandle {
    type Target = FakeProbe;

    fn deref(&self) -> &FakeProbe {
        &self.0
    }
}

impl Probe for ProbeHandle {
    fn is_running(&self) -> bool {
        self.running.get()
    }

    fn next_event(&self) -> retile_platform::probe::Result<Event> {
        self.events
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| PlatformError::Disconnected("event script exhausted".into()))
    }

    fn list_window_ids(&self) -> retile_platform::probe::Result<Vec<WindowId>> {
        let mut ids: Vec<WindowId> = self.windows.borrow().keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    fn window_attrs(&self, id: WindowId) -> retile_platform::probe::Result<WindowAttrs> {
        if self.fail_window_attrs.get() {
            return Err(PlatformError::WindowGone(id.0));
        }
        self.windows
            .borrow()
            .get(&id)
            .cloned()
            .ok_or(PlatformError::WindowGone(id.0))
    }

    fn active_window_id(&self) -> retile_platform::probe::Result<Option<WindowId>> {
        Ok(self.active.get())
    }

    fn desktop_layout(&self) -> retile_platform::probe::Result<Vec<DesktopAttrs>> {
        Ok(self.layout.borrow().clone())
    }

    fn move_resize(&self, id: WindowId, rect: Rect) -> retile_platform::probe::Result<()> {
        self.placements.borrow_mut().push((id, rect));
        if let Some(attrs) = self.windows.borrow_mut().get_mut(&id) {
            attrs.rect = rect;
        }
        Ok(())
    }

    fn activate(&self, id: WindowId) -> retile_platform::probe::Result<()> {
        if self.fail_activate.get() {
            return Err(PlatformError::WindowManagerError("activate refused".into()));
        }
        self.activations.borrow_mut().push(id);
        self.active.set(Some(id));
        Ok(())
    }

    fn resolve_key(&self, name: &str) -> retile_platform::probe::Result<u32> {
        Ok(name.bytes().map(u32::from).sum())
    }

    fn grab_key(&self, combo: KeyCombo) -> retile_platform::probe::Result<()> {
        self.grabbed.borrow_mut().push(combo);
        Ok(())
    }

    fn ungrab_key(&self, combo: KeyCombo) -> retile_platform::probe::Result<()> {
        self.grabbed.borrow_mut().retain(|c| *c != combo);
        Ok(())
    }
}

fn single_screen_layout() -> Vec<DesktopAttrs> {
    vec![DesktopAttrs {
        id: DesktopId(0),
        name: "main".into(),
        viewports: vec![ViewportAttrs {
            id: ViewportId(0),
            rect: Rect::new(0, 0, 1920, 1080),
            screens: vec![ScreenAttrs {
                id: ScreenId(0),
                rect: Rect::new(0, 0, 1920, 1080),
                workarea: Rect::new(0, 0, 1920, 1080),
            }],
        }],
    }]
}

fn fast_config() -> RetileConfig {
    let mut config = RetileConfig::default();
    config.general.timeout = 0.0;
    config.general.screen_change_delay = 0.0;
    config
}

fn controller_for(probe: &Rc<FakeProbe>) -> Controller {
    Controller {
        probe: Box::new(ProbeHandle(Rc::clone(probe))),
        config: fast_config(),
        config_path: None,
        registry: TilerRegistry::builtin(),
        hotkey_map: HotkeyMap::empty(),
        state: State::new(),
        shutdown: Arc::new(AtomicBool::new(false)),
    }
}

/// Write a config file and return its handle; `timeout` is zeroed so tests
/// never sleep.
fn write_config(extra: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[general]\ntimeout = 0.0\nscreen_change_delay = 0.0\n{extra}"
    )
    .unwrap();
    file.flush().unwrap();
    file
}

/// A controller bootstrapped against the probe with a zero-delay config.
fn bootstrapped(probe: &Rc<FakeProbe>) -> (Controller, tempfile::NamedTempFile) {
    let file = write_config("");
    let mut controller = controller_for(probe);
    controller.config_path = Some(file.path().to_path_buf());
    controller.bootstrap().unwrap();
    (controller, file)
}

fn combo_for(probe: &Rc<FakeProbe>, key: &str, modifiers: &[Modifier]) -> KeyCombo {
    KeyCombo::new(
        ProbeHandle(Rc::clone(probe)).resolve_key(key).unwrap(),
        modifiers,
    )
}

#[test]
fn bootstrap_loads_desktops_windows_and_hotkeys() {
    let probe = FakeProbe::new();
    probe.add_window(5, 10, 10);
    probe.add_window(7, 600, 10);
    probe.active.set(Some(WindowId(5)));

    let (controller, _file) = bootstrapped(&probe);

    assert_eq!(controller.state.screens.len(), 1);
    assert_eq!(controller.state.windows.len(), 2);
    assert_eq!(controller.state.active_window(), Some(WindowId(5)));
    assert_eq!(
        probe.grabbed.borrow().len(),
        RetileConfig::default().keybinds.len()
    );
    let screen = &controller.state.screens[&ScreenId(0)];
    assert_eq!(screen.storage.len(), 2);
}

#[test]
fn bootstrap_without_config_file_uses_defaults() {
    let probe = FakeProbe::new();
    let mut controller = controller_for(&probe);
    controller.config_path = Some("/nonexistent/retile.toml".into());

    controller.bootstrap().unwrap();
    assert_eq!(controller.config.tilers.default, "vertical");
    assert!(!probe.grabbed.borrow().is_empty());
}

#[test]
fn drain_applies_layout_and_empties_queue() {
    let probe = FakeProbe::new();
    probe.add_window(5, 10, 10);
    probe.add_window(7, 600, 10);
    let (mut controller, _file) = bootstrapped(&probe);

    probe.placements.borrow_mut().clear();
    controller.state.enqueue_retile(ScreenId(0));
    controller.drain_retile_queue().unwrap();

    assert_eq!(probe.placements.borrow().len(), 2);
    assert!(!controller.state.retile_pending());
}

#[test]
fn duplicate_enqueue_tiles_once() {
    let probe = FakeProbe::new();
    probe.add_window(5, 10, 10);
    let (mut controller, _file) = bootstrapped(&probe);

    probe.placements.borrow_mut().clear();
    controller.state.enqueue_retile(ScreenId(0));
    controller.state.enqueue_retile(ScreenId(0));
    controller.drain_retile_queue().unwrap();

    assert_eq!(probe.placements.borrow().len(), 1);
}

#[test]
fn windows_deleted_only_after_confirmed_absence() {
    let probe = FakeProbe::new();
    probe.add_window(5, 10, 10);
    probe.add_window(7, 600, 10);
    probe.add_window(9, 10, 600);
    probe.active.set(Some(WindowId(5)));
    let (mut controller, _file) = bootstrapped(&probe);
    assert_eq!(controller.state.windows.len(), 3);

    probe.remove_window(7);
    controller.dispatch_event(Event::WindowListChange).unwrap();

    assert!(!controller.state.windows.contains_key(&WindowId(7)));
    assert!(controller.state.windows.contains_key(&WindowId(5)));
    assert!(controller.state.windows.contains_key(&WindowId(9)));
    let screen = &controller.state.screens[&ScreenId(0)];
    assert!(!screen.storage.contains(WindowId(7)));
    assert_eq!(screen.storage.len(), 2);
}

#[test]
fn missing_window_signal_does_not_delete() {
    let probe = FakeProbe::new();
    probe.add_window(5, 10, 10);
    let (mut controller, _file) = bootstrapped(&probe);

    // A single failed attribute fetch is not proof of death.
    probe.fail_window_attrs.set(true);
    controller
        .dispatch_event(Event::WindowChange(WindowId(5)))
        .unwrap();

    assert!(controller.state.windows.contains_key(&WindowId(5)));
    let screen = &controller.state.screens[&ScreenId(0)];
    assert!(screen.storage.contains(WindowId(5)));
}

#[test]
fn keypress_failure_is_contained() {
    let probe = FakeProbe::new();
    probe.add_window(5, 10, 10);
    probe.add_window(7, 600, 10);
    probe.active.set(Some(WindowId(5)));
    let (mut controller, _file) = bootstrapped(&probe);

    probe.fail_activate.set(true);
    let combo = combo_for(&probe, "J", &[Modifier::Super]);
    controller
        .dispatch_event(Event::KeyPress {
            keycode: combo.keycode,
            modifiers: vec![Modifier::Super],
        })
        .unwrap();

    // The loop keeps dispatching after the contained failure.
    probe.fail_activate.set(false);
    probe.active.set(Some(WindowId(7)));
    controller.dispatch_event(Event::ActiveChange).unwrap();
    assert_eq!(controller.state.active_window(), Some(WindowId(7)));
}

#[test]
fn unbound_keypress_is_ignored() {
    let probe = FakeProbe::new();
    let (mut controller, _file) = bootstrapped(&probe);

    controller
        .dispatch_event(Event::KeyPress {
            keycode: 9999,
            modifiers: vec![],
        })
        .unwrap();
    assert!(probe.activations.borrow().is_empty());
}

#[test]
fn focus_next_cycles_screen_order() {
    let probe = FakeProbe::new();
    probe.add_window(5, 10, 10);
    probe.add_window(7, 600, 10);
    probe.active.set(Some(WindowId(5)));
    let (mut controller, _file) = bootstrapped(&probe);

    let combo = combo_for(&probe, "J", &[Modifier::Super]);
    controller
        .dispatch_event(Event::KeyPress {
            keycode: combo.keycode,
            modifiers: vec![Modifier::Super],
        })
        .unwrap();

    assert_eq!(probe.activations.borrow().as_slice(), &[WindowId(7)]);
}

#[test]
fn untile_restores_original_geometry() {
    let probe = FakeProbe::new();
    probe.add_window(5, 10, 10);
    probe.add_window(7, 600, 10);
    probe.active.set(Some(WindowId(5)));
    let (mut controller, _file) = bootstrapped(&probe);

    // Tile first so geometry diverges from the originals.
    controller.drain_retile_queue().unwrap();
    probe.placements.borrow_mut().clear();

    let combo = combo_for(&probe, "U", &[Modifier::Super]);
    controller
        .dispatch_event(Event::KeyPress {
            keycode: combo.keycode,
            modifiers: vec![Modifier::Super],
        })
        .unwrap();

    let placements = probe.placements.borrow();
    assert_eq!(placements.len(), 2);
    assert!(placements.contains(&(WindowId(5), Rect::new(10, 10, 500, 400))));
    assert!(placements.contains(&(WindowId(7), Rect::new(600, 10, 500, 400))));
}

#[test]
fn master_grow_queues_retile() {
    let probe = FakeProbe::new();
    probe.add_window(5, 10, 10);
    probe.add_window(7, 600, 10);
    probe.active.set(Some(WindowId(5)));
    let (mut controller, _file) = bootstrapped(&probe);
    controller.drain_retile_queue().unwrap();

    let combo = combo_for(&probe, "L", &[Modifier::Super]);
    controller
        .dispatch_event(Event::KeyPress {
            keycode: combo.keycode,
            modifiers: vec![Modifier::Super],
        })
        .unwrap();
    assert!(controller.state.retile_pending());

    probe.placements.borrow_mut().clear();
    controller.drain_retile_queue().unwrap();
    // Master takes 55% of 1920 after one grow step.
    let master = probe
        .placements
        .borrow()
        .iter()
        .find(|(id, _)| *id == WindowId(5))
        .map(|(_, rect)| *rect)
        .unwrap();
    assert_eq!(master.width, (1920.0_f64 * 0.55) as i32);
}

#[test]
fn reload_rebuilds_hotkeys_atomically() {
    let probe = FakeProbe::new();
    let file = write_config("[keybinds]\n\"Super+T\" = \"tile\"");
    let mut controller = controller_for(&probe);
    controller.config_path = Some(file.path().to_path_buf());
    controller.bootstrap().unwrap();

    let tile_combo = combo_for(&probe, "T", &[Modifier::Super]);
    assert_eq!(probe.grabbed.borrow().as_slice(), &[tile_combo]);

    std::fs::write(
        file.path(),
        "[general]\ntimeout = 0.0\n[keybinds]\n\"Super+J\" = \"focus_next\"\n",
    )
    .unwrap();
    controller.state.request_reload();
    controller.check_reload().unwrap();

    let focus_combo = combo_for(&probe, "J", &[Modifier::Super]);
    assert_eq!(probe.grabbed.borrow().as_slice(), &[focus_combo]);
    assert!(!controller.state.needs_reload());
    assert_eq!(
        controller.state.action_for(focus_combo),
        Some(retile_common::Action::FocusNext)
    );
    assert_eq!(controller.state.action_for(tile_combo), None);
}

#[test]
fn reload_preserves_known_windows() {
    let probe = FakeProbe::new();
    probe.add_window(5, 10, 10);
    probe.add_window(7, 600, 10);
    let (mut controller, file) = bootstrapped(&probe);

    std::fs::write(
        file.path(),
        "[general]\ntimeout = 0.0\n[tilers]\ndefault = \"horizontal\"\n",
    )
    .unwrap();
    controller.state.request_reload();
    controller.check_reload().unwrap();

    assert_eq!(controller.state.windows.len(), 2);
    let screen = &controller.state.screens[&ScreenId(0)];
    assert_eq!(screen.tiler.name(), "horizontal");
    assert_eq!(screen.storage.len(), 2);
    assert!(controller.state.retile_pending());
}

#[test]
fn screen_change_wipes_and_rebuilds() {
    let probe = FakeProbe::new();
    probe.add_window(5, 10, 10);
    probe.active.set(Some(WindowId(5)));
    let (mut controller, _file) = bootstrapped(&probe);
    controller.state.enqueue_retile(ScreenId(0));

    controller.dispatch_event(Event::ScreenChange).unwrap();

    assert_eq!(controller.state.screens.len(), 1);
    assert_eq!(controller.state.windows.len(), 1);
    assert_eq!(controller.state.active_window(), Some(WindowId(5)));
    // Hotkey grabs survive the wipe.
    assert!(!probe.grabbed.borrow().is_empty());
    let combo = combo_for(&probe, "T", &[Modifier::Super]);
    assert!(controller.state.action_for(combo).is_some());
}

#[test]
fn active_change_updates_baseline() {
    let probe = FakeProbe::new();
    probe.add_window(5, 10, 10);
    probe.add_window(7, 600, 10);
    probe.active.set(Some(WindowId(5)));
    let (mut controller, _file) = bootstrapped(&probe);

    probe.active.set(Some(WindowId(7)));
    controller.dispatch_event(Event::ActiveChange).unwrap();
    assert_eq!(controller.state.active_window(), Some(WindowId(7)));

    probe.active.set(None);
    controller.dispatch_event(Event::ActiveChange).unwrap();
    assert_eq!(controller.state.active_window(), None);
    // The desktop half of the baseline is sticky.
    assert_eq!(controller.state.active_desktop(), Some(DesktopId(0)));
}

#[test]
fn quit_keypress_ends_run() {
    let probe = FakeProbe::new();
    let file = write_config("");
    let mut controller = controller_for(&probe);
    controller.config_path = Some(file.path().to_path_buf());

    let combo = combo_for(&probe, "Q", &[Modifier::Super, Modifier::Shift]);
    probe.push_event(Event::KeyPress {
        keycode: combo.keycode,
        modifiers: vec![Modifier::Super, Modifier::Shift],
    });

    controller.run().unwrap();
    assert!(controller.shutdown.load(Ordering::SeqCst));
}

#[test]
fn exhausted_event_source_is_fatal() {
    let probe = FakeProbe::new();
    let file = write_config("");
    let mut controller = controller_for(&probe);
    controller.config_path = Some(file.path().to_path_buf());

    assert!(controller.run().is_err());
}
