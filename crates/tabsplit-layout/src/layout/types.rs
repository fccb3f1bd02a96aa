//! Layout engine types and configuration.

use serde::{Deserialize, Serialize};
use tabsplit_common::types::Rect;

/// Pixels each split window extends past the midline.
pub const DEFAULT_OVERLAP: i32 = 8;
pub const DEFAULT_MIN_WIDTH: i32 = 400;
pub const DEFAULT_MIN_HEIGHT: i32 = 300;
pub const DEFAULT_FALLBACK_WIDTH: i32 = 800;
pub const DEFAULT_FALLBACK_HEIGHT: i32 = 600;

/// Configuration for the engine that computes split-window positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEngine {
    /// Overlap in pixels added to each half. The two windows overlap by
    /// twice this amount.
    pub overlap: i32,
    /// Floor applied to the chosen display area's width.
    pub min_width: i32,
    /// Floor applied to the chosen display area's height.
    pub min_height: i32,
    /// Used for a window width the host did not report.
    pub fallback_width: i32,
    /// Used for a window height the host did not report.
    pub fallback_height: i32,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            overlap: DEFAULT_OVERLAP,
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            fallback_width: DEFAULT_FALLBACK_WIDTH,
            fallback_height: DEFAULT_FALLBACK_HEIGHT,
        }
    }
}

/// Where the display area came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplaySource {
    /// A monitor's work area contains the window center.
    ContainingMonitor(usize),
    /// No monitor contains the window center; the first one was used.
    FirstMonitor,
    /// No monitors were reported; the window's own bounds were used.
    WindowBounds,
}

/// Result of a split computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitLayout {
    /// Display area after minimum-size clamping.
    pub display: Rect,
    pub source: DisplaySource,
    /// Bounds for the original window.
    pub left_window: Rect,
    /// Bounds for the duplicated window.
    pub right_window: Rect,
}

impl SplitLayout {
    /// Horizontal pixels shared by both windows.
    pub fn overlap_width(&self) -> i32 {
        self.left_window.right().saturating_sub(self.right_window.left)
    }
}
