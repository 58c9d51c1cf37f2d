//! Per-screen window storage for tiling.
//!
//! Keeps the tileable windows of one screen split into a master section and
//! a slave section. Hidden windows are removed by the controller before they
//! reach storage, so everything here participates in layout.

use retile_common::WindowId;

#[derive(Debug, Clone)]
pub struct TileStorage {
    masters: Vec<WindowId>,
    slaves: Vec<WindowId>,
    /// How many windows the master section may hold.
    master_capacity: usize,
}

impl TileStorage {
    pub fn new() -> Self {
        Self {
            masters: Vec::new(),
            slaves: Vec::new(),
            master_capacity: 1,
        }
    }

    pub fn masters(&self) -> &[WindowId] {
        &self.masters
    }

    pub fn slaves(&self) -> &[WindowId] {
        &self.slaves
    }

    pub fn len(&self) -> usize {
        self.masters.len() + self.slaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masters.is_empty() && self.slaves.is_empty()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.masters.contains(&id) || self.slaves.contains(&id)
    }

    /// Add a window, filling the master section first.
    ///
    /// Re-adding a known window is a no-op.
    pub fn add(&mut self, id: WindowId) {
        if self.contains(id) {
            return;
        }
        if self.masters.len() < self.master_capacity {
            self.masters.push(id);
        } else {
            self.slaves.push(id);
        }
    }

    /// Remove a window, backfilling the master section from the slaves.
    pub fn remove(&mut self, id: WindowId) {
        self.masters.retain(|w| *w != id);
        self.slaves.retain(|w| *w != id);
        while self.masters.len() < self.master_capacity && !self.slaves.is_empty() {
            self.masters.push(self.slaves.remove(0));
        }
    }

    /// Swap a window into the master section. The displaced master (the
    /// oldest one, if the section is full) moves to the front of the slaves.
    pub fn promote(&mut self, id: WindowId) {
        if !self.contains(id) || self.masters.contains(&id) {
            return;
        }
        self.slaves.retain(|w| *w != id);
        if self.masters.len() >= self.master_capacity {
            if let Some(displaced) = self.masters.first().copied() {
                self.masters.remove(0);
                self.slaves.insert(0, displaced);
            }
        }
        self.masters.push(id);
    }

    /// Grow the master section by one slot, pulling in the first slave.
    pub fn add_master_slot(&mut self) {
        self.master_capacity += 1;
        if !self.slaves.is_empty() {
            self.masters.push(self.slaves.remove(0));
        }
    }

    /// Shrink the master section by one slot, demoting the newest master.
    /// The section never shrinks below one slot.
    pub fn remove_master_slot(&mut self) {
        if self.master_capacity <= 1 {
            return;
        }
        self.master_capacity -= 1;
        while self.masters.len() > self.master_capacity {
            if let Some(demoted) = self.masters.pop() {
                self.slaves.insert(0, demoted);
            }
        }
    }

    /// All windows in layout order: masters first, then slaves.
    pub fn all(&self) -> Vec<WindowId> {
        let mut out = self.masters.clone();
        out.extend_from_slice(&self.slaves);
        out
    }

    /// The window after `id` in layout order, wrapping around.
    pub fn next_of(&self, id: WindowId) -> Option<WindowId> {
        let all = self.all();
        let pos = all.iter().position(|w| *w == id)?;
        Some(all[(pos + 1) % all.len()])
    }

    /// The window before `id` in layout order, wrapping around.
    pub fn prev_of(&self, id: WindowId) -> Option<WindowId> {
        let all = self.all();
        let pos = all.iter().position(|w| *w == id)?;
        Some(all[(pos + all.len() - 1) % all.len()])
    }
}

impl Default for TileStorage {
    fn default() -> Self {
        Self::new()
    }
}
