pub mod actions;
pub mod errors;
pub mod events;
pub mod types;

pub use actions::Action;
pub use errors::{ConfigError, PlatformError, RetileError, TilingError};
pub use events::Event;
pub use types::{DesktopId, Modifier, Rect, ScreenId, ViewportId, WindowId};

pub type Result<T> = std::result::Result<T, RetileError>;
