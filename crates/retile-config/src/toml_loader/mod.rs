//! TOML config loading: read from a path or the platform default location.

mod loader;
mod paths;
mod template;

pub use loader::{load_default, load_from_path};
pub use paths::{create_default_config, default_config_path};
pub(crate) use template::default_config_toml;
