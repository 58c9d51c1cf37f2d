pub mod hotkeys;
pub mod keymap;
pub mod probe;

pub use hotkeys::{HotkeyMap, KeyCombo};
pub use keymap::{keybind_to_display, parse_keybind, KeyBind};
pub use probe::{
    create_probe, DesktopAttrs, Probe, ScreenAttrs, ViewportAttrs, WindowAttrs,
};
