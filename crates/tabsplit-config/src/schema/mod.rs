//! Configuration schema types for tabsplit.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the built-in defaults.

mod layout;
mod system;
mod translate;

pub use layout::*;
pub use system::*;
pub use translate::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct TabSplitConfig {
    pub layout: LayoutConfig,
    pub readiness: ReadinessConfig,
    pub translate: TranslateConfig,
    pub pages: PagesConfig,
    pub preferences: PreferencesConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
