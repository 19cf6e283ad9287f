//! Error types for skillsync-core

use std::path::{Path, PathBuf};

/// Result type for skillsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the audit and reconciliation engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem primitive failure
    #[error(transparent)]
    Fs(#[from] skillsync_fs::Error),

    /// I/O failure with the path it occurred on
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report serialization failure
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an I/O error with path context
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
