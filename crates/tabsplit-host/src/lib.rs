//! Browser host seams.
//!
//! Everything the split-and-translate sequence needs from the browser is
//! behind two traits: [`BrowserHost`] for windows, tabs and displays, and
//! [`KeyValueStore`] for extension storage. Each call suspends until the
//! host answers. In-memory implementations back the tests and the CLI
//! dry run.

pub mod memory_store;
pub mod simulated;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tabsplit_common::types::{BrowserWindow, MonitorInfo, Rect, Tab, TabId, WindowId};
use tabsplit_common::HostError;

pub use memory_store::MemoryStore;
pub use simulated::SimulatedBrowser;

pub type Result<T> = std::result::Result<T, HostError>;

/// Parameters for opening a new browser window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWindow {
    pub url: String,
    pub bounds: Rect,
    pub focused: bool,
}

/// Changes to apply to an existing window. `None` leaves a property as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowUpdate {
    pub bounds: Option<Rect>,
    pub focused: Option<bool>,
}

impl WindowUpdate {
    pub fn bounds(bounds: Rect) -> Self {
        Self {
            bounds: Some(bounds),
            focused: None,
        }
    }

    pub fn focus() -> Self {
        Self {
            bounds: None,
            focused: Some(true),
        }
    }
}

/// Window, tab and display APIs of the browser.
#[async_trait]
pub trait BrowserHost: Send + Sync {
    async fn get_window(&self, id: WindowId) -> Result<BrowserWindow>;
    async fn create_window(&self, params: CreateWindow) -> Result<BrowserWindow>;
    async fn update_window(&self, id: WindowId, update: WindowUpdate) -> Result<BrowserWindow>;
    async fn get_tab(&self, id: TabId) -> Result<Tab>;
    async fn update_tab(&self, id: TabId, url: &str) -> Result<Tab>;
    /// The active tab of the focused window, if any.
    async fn query_active_tab(&self) -> Result<Option<Tab>>;
    /// Work areas of the attached displays. May be empty when the host
    /// cannot enumerate displays.
    async fn displays(&self) -> Result<Vec<MonitorInfo>>;
}

/// Storage scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageArea {
    /// This device only.
    Local,
    /// Synced across the user's devices.
    Sync,
}

/// Extension key-value storage. Writes replace the previous value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, area: StorageArea, key: &str) -> Result<Option<serde_json::Value>>;
    async fn set(&self, area: StorageArea, key: &str, value: serde_json::Value) -> Result<()>;
}
