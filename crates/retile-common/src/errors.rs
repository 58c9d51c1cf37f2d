use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("window manager error: {0}")]
    WindowManagerError(String),

    #[error("window {0} is gone")]
    WindowGone(u64),

    #[error("key grab error: {0}")]
    KeyGrabError(String),

    #[error("event source disconnected: {0}")]
    Disconnected(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TilingError {
    #[error("unknown tiler: {0}")]
    UnknownTiler(String),

    #[error("no tilers configured")]
    NoTilers,
}

#[derive(Debug, thiserror::Error)]
pub enum RetileError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Tiling(#[from] TilingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
