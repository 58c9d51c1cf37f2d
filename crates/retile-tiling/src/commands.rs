use retile_common::WindowId;

/// A layout-affecting operation executed against one screen's tiler.
///
/// The controller translates user actions into these; focus movement and
/// reload/quit never reach the tiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilingCommand {
    /// Promote a window into the master area, demoting the displaced one.
    PromoteMaster(WindowId),
    /// Grow the master area by one step.
    MasterGrow,
    /// Shrink the master area by one step.
    MasterShrink,
    /// Allow one more window in the master area.
    AddMaster,
    /// Allow one fewer window in the master area.
    RemoveMaster,
}
