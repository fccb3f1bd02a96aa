//! The persisted record of the most recent split.

use serde::{Deserialize, Serialize};
use tabsplit_common::types::{TabId, WindowId};
use tabsplit_common::SplitError;
use tabsplit_host::{KeyValueStore, StorageArea};
use tracing::debug;

/// Local-storage key of the split session record.
pub const SESSION_KEY: &str = "splitSession";

/// Correlates the original and duplicated window/tab of one run. Each run
/// replaces the previous record; nothing ever deletes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitSession {
    pub original_tab_id: TabId,
    pub duplicated_tab_id: TabId,
    pub target_language: String,
    pub original_window_id: WindowId,
    pub duplicated_window_id: WindowId,
}

pub async fn save_session(
    store: &dyn KeyValueStore,
    session: &SplitSession,
) -> Result<(), SplitError> {
    let value = serde_json::to_value(session)?;
    store.set(StorageArea::Local, SESSION_KEY, value).await?;
    debug!(
        original_tab = %session.original_tab_id,
        duplicated_tab = %session.duplicated_tab_id,
        "split session saved"
    );
    Ok(())
}

/// Read the session back. A missing record is an error.
pub async fn load_session(store: &dyn KeyValueStore) -> Result<SplitSession, SplitError> {
    let value = store
        .get(StorageArea::Local, SESSION_KEY)
        .await?
        .ok_or(SplitError::SessionNotFound)?;
    Ok(serde_json::from_value(value)?)
}
