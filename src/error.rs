//! Global error handling for treeforge
//!
//! This module provides a centralized error type shared by the enumerator,
//! the description codec, the materializer and the capture.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Global error type for treeforge operations
#[derive(Error, Debug)]
pub enum TreeForgeError {
    /// The serialized description is missing or unreadable
    #[error("Input not found: {}: {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The description does not parse or a node has an unknown shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Directory creation or file write failed
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output stream errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Specialized Result type for treeforge operations
pub type Result<T> = std::result::Result<T, TreeForgeError>;

/// Creates a TreeForgeError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::TreeForgeError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for attaching the offending path to filesystem errors
pub trait FsResultExt<T> {
    /// Turn an `io::Error` into [`TreeForgeError::Filesystem`] at `path`
    fn fs_context(self, path: &Path) -> Result<T>;
}

impl<T> FsResultExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, path: &Path) -> Result<T> {
        self.map_err(|source| TreeForgeError::Filesystem {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Check that `path` exists and is a directory
pub fn require_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(TreeForgeError::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(TreeForgeError::NotADirectory(path.display().to_string()));
    }
    Ok(())
}
