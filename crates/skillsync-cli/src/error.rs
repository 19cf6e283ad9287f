//! Command-line error type.

use thiserror::Error;

/// Errors surfaced by the `skillsync` binary.
#[derive(Error, Debug)]
#[allow(dead_code)] // User variant is the seam for usage errors clap cannot catch
pub enum CliError {
    /// Engine error.
    #[error(transparent)]
    Core(#[from] skillsync_core::Error),

    /// Serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a custom message.
    #[error("{message}")]
    User {
        /// Error message.
        message: String,
    },
}

impl CliError {
    /// Create a user-facing error.
    #[allow(dead_code)] // companion ctor for the User variant
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

/// CLI result alias.
pub type Result<T> = std::result::Result<T, CliError>;
