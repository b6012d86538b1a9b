//! Error types for focus-core operations.

use std::path::PathBuf;

/// All errors that can occur in focus-core operations.
///
/// Guarded session writes and overlay pushes are deliberately NOT errors:
/// the former are control flow (silent no-ops), the latter are fire-and-forget.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Could not determine home directory")]
    HomeDirNotFound,

    #[error("Storage file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No log entry to update")]
    NoLogEntries,
}

impl CoreError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        CoreError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        CoreError::Json {
            context: context.into(),
            source,
        }
    }
}

/// Convenience type alias for Results using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;
