//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod layout;
mod misc;


use crate::schema::TabSplitConfig;
use tabsplit_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TabSplitConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    layout::validate_layout(&mut errors, config);
    layout::validate_readiness(&mut errors, config);
    misc::validate_translate(&mut errors, config);
    misc::validate_pages(&mut errors, config);
    misc::validate_preferences(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
