//! Translation service URLs.

use tabsplit_config::TabSplitConfig;

/// Endpoint and fixed query parameters of the translation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateTarget {
    pub base_url: String,
    pub source_language: String,
}

impl Default for TranslateTarget {
    fn default() -> Self {
        Self::from_config(&TabSplitConfig::default())
    }
}

impl TranslateTarget {
    pub fn from_config(config: &TabSplitConfig) -> Self {
        Self {
            base_url: config.translate.base_url.clone(),
            source_language: config.translate.source_language.clone(),
        }
    }

    pub fn url_for(&self, target_language: &str, page_url: &str) -> String {
        build_translate_url(
            &self.base_url,
            &self.source_language,
            target_language,
            page_url,
        )
    }
}

/// `<base>?sl=<source>&tl=<target>&u=<page>`, with the page URL
/// percent-encoded as a single query component. Languages are inserted
/// verbatim.
pub fn build_translate_url(
    base_url: &str,
    source_language: &str,
    target_language: &str,
    page_url: &str,
) -> String {
    format!(
        "{base_url}?sl={source_language}&tl={target_language}&u={}",
        urlencoding::encode(page_url)
    )
}
