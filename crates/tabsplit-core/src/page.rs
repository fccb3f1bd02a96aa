//! Which pages can be split and translated.

use tabsplit_common::types::{SourceTab, TabId, WindowId};
use tabsplit_common::SplitError;
use tabsplit_config::TabSplitConfig;

/// A source tab that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTab {
    pub tab_id: TabId,
    pub window_id: WindowId,
    pub url: String,
}

/// URL rules applied before any window is touched.
#[derive(Debug, Clone)]
pub struct PagePolicy {
    blocked_prefixes: Vec<String>,
    rendering_domains: Vec<String>,
}

impl Default for PagePolicy {
    fn default() -> Self {
        Self::from_config(&TabSplitConfig::default())
    }
}

impl PagePolicy {
    pub fn new(blocked_prefixes: Vec<String>, rendering_domains: Vec<String>) -> Self {
        Self {
            blocked_prefixes: blocked_prefixes
                .into_iter()
                .map(|p| p.to_ascii_lowercase())
                .collect(),
            rendering_domains: rendering_domains
                .into_iter()
                .map(|d| d.to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &TabSplitConfig) -> Self {
        Self::new(
            config.pages.blocked_prefixes.clone(),
            config.translate.rendering_domains.clone(),
        )
    }

    /// Reject malformed tabs and pages that cannot be translated.
    pub fn check_source_tab(&self, tab: Option<&SourceTab>) -> Result<ValidatedTab, SplitError> {
        let tab = tab.ok_or_else(|| SplitError::InvalidTab("no tab provided".into()))?;

        let url = tab
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| SplitError::InvalidTab("tab has no URL".into()))?;

        let window_id = tab
            .window_id
            .filter(WindowId::is_valid)
            .ok_or_else(|| SplitError::InvalidTab("tab has no valid window".into()))?;

        if self.is_blocked(url) {
            return Err(SplitError::UnsupportedPage(format!(
                "cannot translate browser-internal or local page: {url}"
            )));
        }
        if self.is_translation_page(url) {
            return Err(SplitError::UnsupportedPage(format!(
                "page is already a translation: {url}"
            )));
        }

        Ok(ValidatedTab {
            tab_id: tab.id.unwrap_or(TabId::NONE),
            window_id,
            url: url.to_string(),
        })
    }

    pub fn is_blocked(&self, url: &str) -> bool {
        let url = url.trim_start().to_ascii_lowercase();
        self.blocked_prefixes.iter().any(|p| url.starts_with(p))
    }

    /// Whether `url` is served by the translation service, i.e. its host
    /// is a rendering domain or a subdomain of one.
    pub fn is_translation_page(&self, url: &str) -> bool {
        let Ok(parsed) = url::Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        self.rendering_domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        })
    }
}
