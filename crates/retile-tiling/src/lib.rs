pub mod commands;
pub mod horizontal;
pub mod registry;
pub mod storage;
pub mod tiler;
pub mod vertical;

pub use commands::TilingCommand;
pub use horizontal::HorizontalTiler;
pub use registry::TilerRegistry;
pub use storage::TileStorage;
pub use tiler::{Placement, Tiler, TilerState};
pub use vertical::VerticalTiler;
