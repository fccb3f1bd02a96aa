//! The user's target-language preference, kept in synced storage.

use tabsplit_common::SplitError;
use tabsplit_config::languages;
use tabsplit_host::{KeyValueStore, StorageArea};
use tracing::{debug, warn};

pub use tabsplit_config::languages::SUPPORTED_LANGUAGES;

/// Sync-storage key of the language preference.
pub const LANGUAGE_KEY: &str = "targetLanguage";

/// Stored language, or `default` when none has been chosen yet.
pub async fn load_language(store: &dyn KeyValueStore, default: &str) -> Result<String, SplitError> {
    match store.get(StorageArea::Sync, LANGUAGE_KEY).await? {
        Some(serde_json::Value::String(code)) if !code.is_empty() => Ok(code),
        Some(other) => {
            warn!(value = %other, "ignoring malformed language preference");
            Ok(default.to_string())
        }
        None => Ok(default.to_string()),
    }
}

pub async fn save_language(store: &dyn KeyValueStore, code: &str) -> Result<(), SplitError> {
    if !languages::is_supported(code) {
        return Err(SplitError::UnsupportedLanguage(code.to_string()));
    }
    store
        .set(StorageArea::Sync, LANGUAGE_KEY, serde_json::Value::from(code))
        .await?;
    debug!(code, "language preference saved");
    Ok(())
}
