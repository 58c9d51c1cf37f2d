//! retile configuration system.
//!
//! TOML-based configuration with per-section defaults and full validation,
//! so a partial (or absent) config file works out of the box. The controller
//! re-runs [`load_config`] on every reload cycle; there is no file watcher,
//! reloads are requested explicitly through the `reload` keybind.

pub mod keybinds;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::RetileConfig;

use std::path::Path;

use retile_common::ConfigError;

/// Load config from an explicit path, or from the platform default path.
///
/// A missing file is informational either way: execution proceeds with
/// defaults. The default path additionally gets a documented default config
/// written for the user to edit.
pub fn load_config(path: Option<&Path>) -> Result<RetileConfig, ConfigError> {
    let config = match path {
        Some(p) => match toml_loader::load_from_path(p) {
            Ok(config) => config,
            Err(ConfigError::FileNotFound(p)) => {
                tracing::info!("no config at {}, using defaults", p.display());
                RetileConfig::default()
            }
            Err(e) => return Err(e),
        },
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\ntimeout = 0.5").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert!((config.general.timeout - 0.5).abs() < f64::EPSILON);
        // Unspecified sections fall back to defaults
        assert_eq!(config.tilers.default, "vertical");
    }

    #[test]
    fn missing_explicit_path_falls_back_to_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/retile.toml"))).unwrap();
        assert_eq!(config, RetileConfig::default());
    }

    #[test]
    fn invalid_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\ntimeout = -1.0").unwrap();
        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
