//! Error types for skillsync-fs

use std::path::{Path, PathBuf};

/// Result type for skillsync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by filesystem primitives
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O failure with the path it occurred on
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
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
