//! TOML config file loading and creation.

use crate::schema::TabSplitConfig;
use crate::validation;
use std::path::Path;
use tabsplit_common::ConfigError;
use tracing::{info, warn};

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// After loading, the config is validated; if validation fails, a warning
/// is logged and the default config is returned.
pub fn load_from_path(path: &Path) -> Result<TabSplitConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let config: TabSplitConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(TabSplitConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/tabsplit/config.toml`
/// On Linux: `~/.config/tabsplit/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<TabSplitConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(TabSplitConfig::default());
    }

    load_from_path(&path)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        ConfigError::ParseError("could not determine config directory".into())
    })?;
    Ok(config_dir.join("tabsplit").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Generate the default TOML config content with comments.
fn default_config_toml() -> &'static str {
    r##"# tabsplit configuration
# Only override what you want to change -- missing fields use defaults.

[layout]
# overlap = 8            # 0-64, pixels each window reaches past the midline
# min_width = 400        # 1-10000
# min_height = 300       # 1-10000
# fallback_width = 800   # used when the host reports no window width
# fallback_height = 600

[readiness]
# poll_interval_ms = 100 # 10-5000
# timeout_ms = 3000      # poll_interval_ms-60000

[translate]
# base_url = "https://translate.google.com/translate"
# source_language = "auto"
# rendering_domains = ["translate.google.com", "translate.goog"]

[pages]
# blocked_prefixes = ["chrome://", "chrome-extension://", "edge://", "about:", "moz-extension://", "file://"]

[preferences]
# default_language = "en"

[logging]
# level = "INFO"         # DEBUG, INFO, WARNING, ERROR
"##
}
