//! Error types for the triage webhook

use thiserror::Error;

/// Result type alias for webhook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the triage webhook
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Intent table could not be loaded or is inconsistent
    #[error("intent table error: {0}")]
    IntentTable(String),

    /// The single-winner resolver was called with no contexts
    #[error("no active contexts to resolve")]
    NoActiveContexts,

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
