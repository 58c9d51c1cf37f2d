//! Full configuration validation.
//!
//! Collects every problem into a single `ConfigError` instead of failing on
//! the first one.

use retile_common::ConfigError;

use crate::keybinds;
use crate::schema::RetileConfig;

/// Run all validations on a config.
pub fn validate(config: &RetileConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_general(&mut errors, config);
    validate_tilers(&mut errors, config);

    if let Err(e) = keybinds::validate_commands(&config.keybinds) {
        errors.push(e.to_string());
    }
    if let Err(e) = keybinds::validate_no_duplicates(&config.keybinds) {
        errors.push(e.to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_general(errors: &mut Vec<String>, config: &RetileConfig) {
    if config.general.timeout < 0.0 || config.general.timeout > 10.0 {
        errors.push(format!(
            "general.timeout must be between 0 and 10 seconds (got {})",
            config.general.timeout
        ));
    }
    if config.general.screen_change_delay < 0.0 || config.general.screen_change_delay > 60.0 {
        errors.push(format!(
            "general.screen_change_delay must be between 0 and 60 seconds (got {})",
            config.general.screen_change_delay
        ));
    }
}

fn validate_tilers(errors: &mut Vec<String>, config: &RetileConfig) {
    if config.tilers.enabled.is_empty() {
        errors.push("tilers.enabled must list at least one tiler".into());
    }
    if !config.tilers.enabled.contains(&config.tilers.default) {
        errors.push(format!(
            "tilers.default '{}' is not in tilers.enabled",
            config.tilers.default
        ));
    }
}
