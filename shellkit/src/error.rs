//! Error taxonomy shared by every shellkit operation.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors surfaced by listing, file operations and process execution.
///
/// Nothing is retried or recovered locally: the first failure aborts the
/// operation and is returned as-is.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("path not found: {}", .path.display())]
    PathNotFound { path: PathBuf },

    #[error("path already exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("process could not start: {program}")]
    ProcessStart {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid option: {reason}")]
    InvalidOption { reason: String },

    #[error("invalid pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ShellError>;

impl ShellError {
    /// Classify an io error raised while touching `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::PathNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists {
                path: path.to_path_buf(),
            },
            _ => Self::Io {
                context: path.display().to_string(),
                source: err,
            },
        }
    }

    pub fn invalid_option(reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            reason: reason.into(),
        }
    }

    /// Wrap an io error that has no single path to blame (pipes, threads).
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
