//! Validation for the translate, pages, and preferences sections.

use crate::languages;
use crate::schema::TabSplitConfig;

pub(crate) fn validate_translate(errors: &mut Vec<String>, config: &TabSplitConfig) {
    let translate = &config.translate;
    if !translate.base_url.starts_with("https://") {
        errors.push(format!(
            "translate.base_url = {:?} must use https",
            translate.base_url
        ));
    }
    if translate.source_language.trim().is_empty() {
        errors.push("translate.source_language must not be empty".into());
    }
    if translate.rendering_domains.is_empty() {
        errors.push("translate.rendering_domains must list at least one host".into());
    }
    if translate.rendering_domains.iter().any(|d| d.trim().is_empty()) {
        errors.push("translate.rendering_domains contains an empty host".into());
    }
}

pub(crate) fn validate_pages(errors: &mut Vec<String>, config: &TabSplitConfig) {
    if config
        .pages
        .blocked_prefixes
        .iter()
        .any(|p| p.trim().is_empty())
    {
        errors.push("pages.blocked_prefixes contains an empty prefix".into());
    }
}

pub(crate) fn validate_preferences(errors: &mut Vec<String>, config: &TabSplitConfig) {
    let code = &config.preferences.default_language;
    if !languages::is_supported(code) {
        errors.push(format!(
            "preferences.default_language = {code:?} is not a supported language"
        ));
    }
}
