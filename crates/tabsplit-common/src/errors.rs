use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures reported by the browser host (window, tab, display and
/// storage APIs).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("No window with id: {0}")]
    WindowNotFound(i32),

    #[error("No tab with id: {0}")]
    TabNotFound(i32),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("{0}")]
    Rejected(String),
}

/// Errors raised by the split-and-translate sequence.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("invalid tab: {0}")]
    InvalidTab(String),

    #[error("unsupported page: {0}")]
    UnsupportedPage(String),

    #[error("window creation failed: {0}")]
    WindowCreation(String),

    #[error("split session not found")]
    SessionNotFound,

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TabSplitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
