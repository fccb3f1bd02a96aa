use serde::{Deserialize, Serialize};
use std::fmt;

use super::WindowBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub i32);

impl WindowId {
    /// Sentinel the host uses for "no window".
    pub const NONE: WindowId = WindowId(-1);

    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i32);

impl TabId {
    /// Sentinel the host uses for "no tab".
    pub const NONE: TabId = TabId(-1);

    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// Load status of a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    #[default]
    Loading,
    Complete,
    Unloaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub window_id: WindowId,
    pub url: Option<String>,
    #[serde(default)]
    pub status: TabStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserWindow {
    pub id: WindowId,
    #[serde(flatten)]
    pub bounds: WindowBounds,
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub focused: bool,
}

impl BrowserWindow {
    pub fn first_tab(&self) -> Option<&Tab> {
        self.tabs.first()
    }
}

/// The tab a split was requested for, exactly as the caller sent it.
/// Every field is optional so malformed requests can be rejected with a
/// precise message instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTab {
    #[serde(default)]
    pub id: Option<TabId>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub window_id: Option<WindowId>,
}

impl From<&Tab> for SourceTab {
    fn from(tab: &Tab) -> Self {
        Self {
            id: Some(tab.id),
            url: tab.url.clone(),
            window_id: Some(tab.window_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_validity() {
        assert!(WindowId(0).is_valid());
        assert!(!WindowId::NONE.is_valid());
        assert!(TabId(17).is_valid());
        assert!(!TabId::NONE.is_valid());
    }

    #[test]
    fn ids_order_numerically() {
        let mut tabs = vec![TabId(3), TabId::NONE, TabId(1)];
        tabs.sort();
        assert_eq!(tabs, vec![TabId::NONE, TabId(1), TabId(3)]);
        assert!(WindowId(2) > WindowId(1));
    }

    #[test]
    fn id_display() {
        assert_eq!(WindowId(3).to_string(), "window-3");
        assert_eq!(TabId(42).to_string(), "tab-42");
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        assert_eq!(serde_json::to_string(&TabId(7)).unwrap(), "7");
        let id: WindowId = serde_json::from_str("12").unwrap();
        assert_eq!(id, WindowId(12));
    }

    #[test]
    fn tab_status_wire_names() {
        let status: TabStatus = serde_json::from_str("\"complete\"").unwrap();
        assert_eq!(status, TabStatus::Complete);
        assert_eq!(
            serde_json::to_string(&TabStatus::Loading).unwrap(),
            "\"loading\""
        );
    }

    #[test]
    fn window_bounds_flatten() {
        let json = r#"{"id":4,"left":10,"top":20,"width":300,"tabs":[]}"#;
        let win: BrowserWindow = serde_json::from_str(json).unwrap();
        assert_eq!(win.id, WindowId(4));
        assert_eq!(win.bounds.left, Some(10));
        assert_eq!(win.bounds.height, None);
        assert!(win.first_tab().is_none());
    }

    #[test]
    fn source_tab_partial_json() {
        let json = r#"{"id":5,"url":"https://example.com"}"#;
        let src: SourceTab = serde_json::from_str(json).unwrap();
        assert_eq!(src.id, Some(TabId(5)));
        assert_eq!(src.url.as_deref(), Some("https://example.com"));
        assert!(src.window_id.is_none());
    }

    #[test]
    fn source_tab_from_tab() {
        let tab = Tab {
            id: TabId(1),
            window_id: WindowId(2),
            url: Some("https://example.com".into()),
            status: TabStatus::Complete,
        };
        let src = SourceTab::from(&tab);
        assert_eq!(src.window_id, Some(WindowId(2)));
    }
}
