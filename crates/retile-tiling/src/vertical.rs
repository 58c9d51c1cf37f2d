//! The default layout: a master column on the left, slaves stacked on the
//! right.

use retile_common::Rect;

use crate::storage::TileStorage;
use crate::tiler::{Placement, Tiler, TilerState};

#[derive(Debug, Default)]
pub struct VerticalTiler {
    state: TilerState,
}

impl Tiler for VerticalTiler {
    fn name(&self) -> &'static str {
        "vertical"
    }

    fn layout(&self, workarea: Rect, storage: &TileStorage) -> Vec<Placement> {
        let masters = storage.masters();
        let slaves = storage.slaves();
        let mut placements = Vec::with_capacity(storage.len());

        // The master column takes the full width when there are no slaves;
        // otherwise the configured fraction.
        let master_width = if slaves.is_empty() {
            workarea.width
        } else {
            (workarea.width as f64 * self.state.factor) as i32
        };
        let master_height = if masters.is_empty() {
            workarea.height
        } else {
            workarea.height / masters.len() as i32
        };

        let slave_width = if masters.is_empty() {
            workarea.width
        } else {
            workarea.width - master_width
        };
        let slave_height = if slaves.is_empty() {
            workarea.height
        } else {
            workarea.height / slaves.len() as i32
        };
        let slave_x = if masters.is_empty() {
            workarea.x
        } else {
            workarea.x + master_width
        };

        let mut y = workarea.y;
        for master in masters {
            let rect = Rect::new(workarea.x, y, master_width, master_height);
            placements.push(Placement {
                window: *master,
                rect: rect.inset(self.state.margin),
            });
            y += master_height;
        }

        let mut y = workarea.y;
        for slave in slaves {
            let rect = Rect::new(slave_x, y, slave_width, slave_height);
            placements.push(Placement {
                window: *slave,
                rect: rect.inset(self.state.margin),
            });
            y += slave_height;
        }

        placements
    }

    fn state(&self) -> &TilerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut TilerState {
        &mut self.state
    }
}
