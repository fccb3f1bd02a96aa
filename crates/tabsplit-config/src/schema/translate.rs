//! Translation service and page policy configuration.

use serde::{Deserialize, Serialize};

/// Where the duplicated window is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Endpoint that renders a translated copy of a page. Must be https.
    pub base_url: String,
    /// Value of the `sl` query parameter.
    pub source_language: String,
    /// Hosts that serve translated pages. A source page on one of these
    /// (or a subdomain) is already a translation.
    pub rendering_domains: Vec<String>,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com/translate".into(),
            source_language: "auto".into(),
            rendering_domains: vec!["translate.google.com".into(), "translate.goog".into()],
        }
    }
}

/// Pages that cannot be translated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// URL prefixes rejected before any window is touched.
    pub blocked_prefixes: Vec<String>,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            blocked_prefixes: vec![
                "chrome://".into(),
                "chrome-extension://".into(),
                "edge://".into(),
                "about:".into(),
                "moz-extension://".into(),
                "file://".into(),
            ],
        }
    }
}

/// Language preference defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Target language used until the user picks one.
    pub default_language: String,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            default_language: "en".into(),
        }
    }
}
