pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, HostError, SplitError, TabSplitError};
pub use id::new_correlation_id;
pub use types::{
    BrowserWindow, MonitorInfo, Rect, SourceTab, Tab, TabId, TabStatus, WindowBounds, WindowId,
};
