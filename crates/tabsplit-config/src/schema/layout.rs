//! Split-window geometry configuration.

use serde::{Deserialize, Serialize};

/// Geometry of the side-by-side split.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pixels each window extends past the midline (valid range: 0-64).
    pub overlap: i32,
    /// Minimum display width used for the split (valid range: 1-10000).
    pub min_width: i32,
    /// Minimum display height used for the split (valid range: 1-10000).
    pub min_height: i32,
    /// Width assumed when the host reports none (must be >= min_width).
    pub fallback_width: i32,
    /// Height assumed when the host reports none (must be >= min_height).
    pub fallback_height: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            overlap: 8,
            min_width: 400,
            min_height: 300,
            fallback_width: 800,
            fallback_height: 600,
        }
    }
}

/// Polling of a tab until it finishes loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Interval between load-status checks in ms (valid range: 10-5000).
    pub poll_interval_ms: u64,
    /// Give up waiting after this many ms (valid range: poll_interval_ms-60000).
    pub timeout_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            timeout_ms: 3000,
        }
    }
}
