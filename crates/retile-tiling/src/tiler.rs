//! The tiler trait and the state shared by every layout algorithm.

use retile_common::{Rect, WindowId};

use crate::commands::TilingCommand;
use crate::storage::TileStorage;

/// Where one window should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub window: WindowId,
    pub rect: Rect,
}

/// Tunable layout state common to the built-in tilers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilerState {
    /// Fraction of the workarea given to the master section (0.1 to 0.9).
    pub factor: f64,
    /// Pixel margin applied around every placed window.
    pub margin: i32,
}

impl TilerState {
    const FACTOR_STEP: f64 = 0.05;
    const FACTOR_MIN: f64 = 0.1;
    const FACTOR_MAX: f64 = 0.9;

    pub fn grow(&mut self) {
        self.factor = (self.factor + Self::FACTOR_STEP).min(Self::FACTOR_MAX);
    }

    pub fn shrink(&mut self) {
        self.factor = (self.factor - Self::FACTOR_STEP).max(Self::FACTOR_MIN);
    }
}

impl Default for TilerState {
    fn default() -> Self {
        Self {
            factor: 0.5,
            margin: 0,
        }
    }
}

/// A pluggable layout engine that arranges the windows of one screen.
///
/// Tilers are pure with respect to the windowing system: `layout` computes
/// placements and the controller applies them through the probe. A failing
/// layout is a logic error, so `layout` is infallible by contract.
pub trait Tiler {
    fn name(&self) -> &'static str;

    /// Compute a placement for every window in storage, masters first.
    fn layout(&self, workarea: Rect, storage: &TileStorage) -> Vec<Placement>;

    /// Apply a layout command. Returns true if the screen needs retiling.
    fn execute(&mut self, cmd: TilingCommand, storage: &mut TileStorage) -> bool {
        match cmd {
            TilingCommand::PromoteMaster(id) => {
                storage.promote(id);
                true
            }
            TilingCommand::MasterGrow => {
                self.state_mut().grow();
                true
            }
            TilingCommand::MasterShrink => {
                self.state_mut().shrink();
                true
            }
            TilingCommand::AddMaster => {
                storage.add_master_slot();
                true
            }
            TilingCommand::RemoveMaster => {
                storage.remove_master_slot();
                true
            }
        }
    }

    fn state(&self) -> &TilerState;
    fn state_mut(&mut self) -> &mut TilerState;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_clamps_at_bounds() {
        let mut state = TilerState::default();
        for _ in 0..20 {
            state.grow();
        }
        assert!((state.factor - 0.9).abs() < 1e-9);
        for _ in 0..40 {
            state.shrink();
        }
        assert!((state.factor - 0.1).abs() < 1e-9);
    }

    #[test]
    fn default_factor_is_half() {
        assert!((TilerState::default().factor - 0.5).abs() < f64::EPSILON);
    }
}
