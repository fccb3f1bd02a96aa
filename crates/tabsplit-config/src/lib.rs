//! tabsplit configuration system.
//!
//! Provides TOML-based configuration with full validation. All config
//! sections use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tabsplit_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod languages;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use languages::SUPPORTED_LANGUAGES;
pub use schema::TabSplitConfig;

use std::path::Path;

use tabsplit_common::ConfigError;

/// Load config from the platform default path, creating it if absent.
/// Invalid values are replaced by defaults with a warning.
pub fn load_config() -> Result<TabSplitConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from an explicit path (e.g. a `--config` override).
pub fn load_config_from(path: &Path) -> Result<TabSplitConfig, ConfigError> {
    toml_loader::load_from_path(path)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &TabSplitConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
