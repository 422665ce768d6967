//! Error types for aireadme.
//!
//! Library crates use [`AiReadmeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all aireadme operations.
#[derive(Debug, thiserror::Error)]
pub enum AiReadmeError {
    /// The repository root could not be resolved (missing or not a directory).
    #[error("repository root is not a directory: {path}")]
    Resolution { path: PathBuf },

    /// `require_existing` was set but the target file is absent.
    #[error("AI_README.md does not exist at {path}")]
    MissingReadme { path: PathBuf },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Request validation error (blank required field, malformed input).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Configuration loading or parsing error.
    #[error("config error: {message}")]
    Config { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AiReadmeError>;

impl AiReadmeError {
    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
