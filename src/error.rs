use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur while the
/// tool lists, fetches, parses, or reports on mod archives.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading directories or writing reports.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization of a report fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the zip reader while opening a local archive.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Raised when the configuration file is not valid TOML or has unknown keys.
    #[error("configuration error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Raised when embedded mod metadata is malformed or lacks mandatory fields.
    #[error("metadata parse error: {0}")]
    MetadataParse(String),

    /// Raised when listing or fetching from a local or remote source fails.
    #[error("failed to fetch {path}: {reason}")]
    Fetch { path: String, reason: String },

    /// Raised when the user provides a path that does not exist.
    #[error("input directory not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the merged settings are incomplete or out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ToolError {
    pub(crate) fn fetch(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ToolError::Fetch {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
