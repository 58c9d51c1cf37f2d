//! Transposed layout: a master row on top, slaves side by side below.

use retile_common::Rect;

use crate::storage::TileStorage;
use crate::tiler::{Placement, Tiler, TilerState};

#[derive(Debug, Default)]
pub struct HorizontalTiler {
    state: TilerState,
}

impl Tiler for HorizontalTiler {
    fn name(&self) -> &'static str {
        "horizontal"
    }

    fn layout(&self, workarea: Rect, storage: &TileStorage) -> Vec<Placement> {
        let masters = storage.masters();
        let slaves = storage.slaves();
        let mut placements = Vec::with_capacity(storage.len());

        let master_width = if masters.is_empty() {
            workarea.width
        } else {
            workarea.width / masters.len() as i32
        };
        let master_height = if slaves.is_empty() {
            workarea.height
        } else {
            (workarea.height as f64 * self.state.factor) as i32
        };

        let slave_width = if slaves.is_empty() {
            workarea.width
        } else {
            workarea.width / slaves.len() as i32
        };
        let slave_height = if masters.is_empty() {
            workarea.height
        } else {
            workarea.height - master_height
        };
        let slave_y = if masters.is_empty() {
            workarea.y
        } else {
            workarea.y + master_height
        };

        let mut x = workarea.x;
        for master in masters {
            let rect = Rect::new(x, workarea.y, master_width, master_height);
            placements.push(Placement {
                window: *master,
                rect: rect.inset(self.state.margin),
            });
            x += master_width;
        }

        let mut x = workarea.x;
        for slave in slaves {
            let rect = Rect::new(x, slave_y, slave_width, slave_height);
            placements.push(Placement {
                window: *slave,
                rect: rect.inset(self.state.margin),
            });
            x += slave_width;
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
