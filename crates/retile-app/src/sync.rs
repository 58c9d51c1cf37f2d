//! Synchronization between the state registry and the windowing system:
//! desktop/window enumeration, incremental refresh, and the confirmed-absence
//! deletion pass.

use std::collections::HashSet;

use retile_common::{PlatformError, Result, WindowId};
use retile_platform::Probe;
use retile_tiling::{TileStorage, TilerRegistry};
use tracing::{debug, info};

use crate::state::{Desktop, Screen, State, Viewport, Window};

/// Build the desktop/viewport/screen hierarchy from a fresh enumeration.
///
/// Every screen gets its own instance of the default tiler and an empty
/// storage; windows are attached separately by [`load_new_windows`].
pub fn load_desktops(
    state: &mut State,
    probe: &dyn Probe,
    registry: &TilerRegistry,
    default_tiler: &str,
) -> Result<()> {
    for desktop_attrs in probe.desktop_layout()? {
        let mut viewport_ids = Vec::with_capacity(desktop_attrs.viewports.len());

        for viewport_attrs in desktop_attrs.viewports {
            let mut screen_ids = Vec::with_capacity(viewport_attrs.screens.len());

            for screen_attrs in viewport_attrs.screens {
                state.screens.insert(
                    screen_attrs.id,
                    Screen {
                        id: screen_attrs.id,
                        viewport: viewport_attrs.id,
                        desktop: desktop_attrs.id,
                        rect: screen_attrs.rect,
                        workarea: screen_attrs.workarea,
                        tiler: registry.create(default_tiler)?,
                        storage: TileStorage::new(),
                    },
                );
                screen_ids.push(screen_attrs.id);
            }

            state.viewports.insert(
                viewport_attrs.id,
                Viewport {
                    id: viewport_attrs.id,
                    desktop: desktop_attrs.id,
                    rect: viewport_attrs.rect,
                    screens: screen_ids,
                },
            );
            viewport_ids.push(viewport_attrs.id);
        }

        state.desktops.insert(
            desktop_attrs.id,
            Desktop {
                id: desktop_attrs.id,
                name: desktop_attrs.name,
                viewports: viewport_ids,
            },
        );
    }

    info!(
        desktops = state.desktops.len(),
        screens = state.screens.len(),
        "desktop hierarchy loaded"
    );
    Ok(())
}

/// Rebuild the hierarchy from a fresh enumeration, re-attaching known
/// windows whose identifiers still resolve to a screen. Windows on
/// desktops or screens that vanished become unmanaged until the next
/// window-list scan picks them up again.
pub fn reload_desktops(
    state: &mut State,
    probe: &dyn Probe,
    registry: &TilerRegistry,
    default_tiler: &str,
) -> Result<()> {
    state.desktops.clear();
    state.viewports.clear();
    state.screens.clear();
    load_desktops(state, probe, registry, default_tiler)?;

    let ids: Vec<WindowId> = state.windows.keys().copied().collect();
    for id in ids {
        let (desktop, x, y, hidden) = {
            let window = &state.windows[&id];
            (window.desktop, window.rect.x, window.rect.y, window.hidden)
        };
        let screen = state.screen_at(desktop, x, y);
        if let Some(window) = state.windows.get_mut(&id) {
            window.screen = screen;
        }
        if let Some(screen_id) = screen {
            if !hidden {
                if let Some(screen) = state.screens.get_mut(&screen_id) {
                    screen.storage.add(id);
                }
                state.enqueue_retile(screen_id);
            }
        }
    }

    Ok(())
}

/// Update geometry of the existing hierarchy in place, queueing screens
/// whose workarea actually changed. Used after workarea-change events;
/// membership is untouched.
pub fn refresh_desktops(state: &mut State, probe: &dyn Probe) -> Result<()> {
    for desktop_attrs in probe.desktop_layout()? {
        for viewport_attrs in desktop_attrs.viewports {
            if let Some(viewport) = state.viewports.get_mut(&viewport_attrs.id) {
                viewport.rect = viewport_attrs.rect;
            }
            for screen_attrs in viewport_attrs.screens {
                let mut changed = false;
                if let Some(screen) = state.screens.get_mut(&screen_attrs.id) {
                    screen.rect = screen_attrs.rect;
                    if screen.workarea != screen_attrs.workarea {
                        screen.workarea = screen_attrs.workarea;
                        changed = !screen.storage.is_empty();
                    }
                }
                if changed {
                    state.enqueue_retile(screen_attrs.id);
                }
            }
        }
    }
    Ok(())
}

/// Scan for windows not yet in the registry and load them.
///
/// Popups are never managed; filtered window classes are skipped entirely.
/// Windows on unknown desktops (sticky windows, transient desktops) stay
/// unmanaged until a later scan can place them.
pub fn load_new_windows(state: &mut State, probe: &dyn Probe, filters: &[String]) -> Result<usize> {
    let active = probe.active_window_id()?;
    let mut loaded = 0;

    for id in probe.list_window_ids()? {
        if state.windows.contains_key(&id) {
            continue;
        }
        let attrs = match probe.window_attrs(id) {
            Ok(attrs) => attrs,
            // The window can be gone again before we get to it.
            Err(PlatformError::WindowGone(_)) => continue,
            Err(e) => return Err(e.into()),
        };
        if attrs.popup || is_filtered(&attrs.class, filters) {
            debug!(window = %id, class = %attrs.class, "skipping unmanaged window");
            continue;
        }
        let screen = state.screen_at(attrs.desktop, attrs.rect.x, attrs.rect.y);
        state.windows.insert(
            id,
            Window {
                id,
                rect: attrs.rect,
                desktop: attrs.desktop,
                hidden: attrs.hidden,
                title: attrs.title,
                class: attrs.class,
                screen,
                original: attrs.rect,
            },
        );
        if let Some(screen_id) = screen {
            if !attrs.hidden {
                if let Some(screen) = state.screens.get_mut(&screen_id) {
                    screen.storage.add(id);
                }
                state.enqueue_retile(screen_id);
            }
        }
        if active == Some(id) {
            state.set_active(Some(id), Some(attrs.desktop));
        }
        loaded += 1;
    }

    Ok(loaded)
}

/// Delete windows whose identifiers are absent from a fresh enumeration.
///
/// This is the only way a window leaves the registry: a single
/// missing-window signal is never trusted, only a full re-scan.
pub fn prune_dead_windows(state: &mut State, probe: &dyn Probe) -> Result<usize> {
    let alive: HashSet<WindowId> = probe.list_window_ids()?.into_iter().collect();
    let dead: Vec<WindowId> = state
        .windows
        .keys()
        .filter(|id| !alive.contains(id))
        .copied()
        .collect();

    for id in &dead {
        if let Some(window) = state.windows.remove(id) {
            info!(window = %id, title = %window.title, "window gone, removing");
            if let Some(screen_id) = window.screen {
                if let Some(screen) = state.screens.get_mut(&screen_id) {
                    screen.storage.remove(*id);
                }
                state.enqueue_retile(screen_id);
            }
        }
    }

    if !dead.is_empty() {
        reload_active(state, probe, false)?;
    }
    Ok(dead.len())
}

/// Refresh one window's cached state from the windowing system.
///
/// Width and height are deliberately NOT taken from the probe: the tiler is
/// in control of window size, and window managers that honor size-increment
/// hints report slightly different values which would otherwise feed back
/// into the next layout. Only position determines screen membership.
pub fn refresh_window(state: &mut State, probe: &dyn Probe, id: WindowId) -> Result<()> {
    let attrs = probe.window_attrs(id)?;

    let (old_screen, old_hidden) = {
        let Some(window) = state.windows.get(&id) else {
            return Ok(());
        };
        (window.screen, window.hidden)
    };

    let new_screen = state.screen_at(attrs.desktop, attrs.rect.x, attrs.rect.y);
    {
        let window = state
            .windows
            .get_mut(&id)
            .ok_or(PlatformError::WindowGone(id.0))?;
        window.rect.x = attrs.rect.x;
        window.rect.y = attrs.rect.y;
        window.desktop = attrs.desktop;
        window.hidden = attrs.hidden;
        window.title = attrs.title;
        window.screen = new_screen;
    }

    if new_screen != old_screen {
        if let Some(screen_id) = old_screen {
            if let Some(screen) = state.screens.get_mut(&screen_id) {
                screen.storage.remove(id);
            }
            state.enqueue_retile(screen_id);
        }
        if let Some(screen_id) = new_screen {
            if !attrs.hidden {
                if let Some(screen) = state.screens.get_mut(&screen_id) {
                    screen.storage.add(id);
                }
            }
            state.enqueue_retile(screen_id);
        }
    } else if attrs.hidden != old_hidden {
        if let Some(screen_id) = new_screen {
            if let Some(screen) = state.screens.get_mut(&screen_id) {
                if attrs.hidden {
                    screen.storage.remove(id);
                } else {
                    screen.storage.add(id);
                }
            }
            state.enqueue_retile(screen_id);
        }
    }

    if probe.active_window_id()? == Some(id) {
        reload_active(state, probe, false)?;
    }
    Ok(())
}

/// Recompute the active window/desktop baseline from the windowing system.
///
/// With `force`, the focused window's attributes are re-fetched so a
/// desktop switch that carried the focused window along is observed;
/// without it the cached desktop is trusted.
pub fn reload_active(state: &mut State, probe: &dyn Probe, force: bool) -> Result<()> {
    let Some(id) = probe.active_window_id()? else {
        state.set_active(None, None);
        return Ok(());
    };

    if force {
        if let Ok(attrs) = probe.window_attrs(id) {
            if let Some(window) = state.windows.get_mut(&id) {
                window.desktop = attrs.desktop;
            }
        }
    }

    let desktop = state.windows.get(&id).map(|w| w.desktop);
    state.set_active(Some(id), desktop);
    Ok(())
}

fn is_filtered(class: &str, filters: &[String]) -> bool {
    let class = class.to_lowercase();
    filters.iter().any(|f| class.contains(&f.to_lowercase()))
}
