//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
///
/// The output must parse back to `RetileConfig::default()`; the paths tests
/// enforce this.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# retile configuration
# Only override what you want to change -- missing fields use defaults.

# Window-class substrings that are never managed (launchers, panels, ...).
filters = ["gmrun"]

[general]
# Settle delay (seconds) applied after bursty window notifications.
# Set to 0 to disable.
timeout = 0.2
# Delay (seconds) before rebuilding all state after a monitor is
# attached/detached or the resolution changes.
screen_change_delay = 2.0

[tilers]
# Tiler assigned to every screen: "vertical" or "horizontal".
default = "vertical"
enabled = ["vertical", "horizontal"]

# Key combination -> command. Commands: tile, untile, focus_next,
# focus_previous, promote_master, master_grow, master_shrink, add_master,
# remove_master, reload, quit.
[keybinds]
"Super+T" = "tile"
"Super+U" = "untile"
"Super+J" = "focus_next"
"Super+K" = "focus_previous"
"Super+Enter" = "promote_master"
"Super+L" = "master_grow"
"Super+H" = "master_shrink"
"Super+Comma" = "add_master"
"Super+Period" = "remove_master"
"Super+Shift+R" = "reload"
"Super+Shift+Q" = "quit"
"##
}
