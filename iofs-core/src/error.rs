// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for iofs

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias
pub type IofsResult<T> = Result<T, IofsError>;

/// Main error type
///
/// A missing path is never an error for the stat probe (it is the `Absent`
/// variant of [`crate::StatResult`]); `NotFound` only shows up for operations
/// that need the path to exist, such as reading or renaming.
#[derive(Error, Debug)]
pub enum IofsError {
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Cross-device move: {} -> {}", .from.display(), .to.display())]
    CrossDevice { from: PathBuf, to: PathBuf },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl IofsError {
    /// Classify an OS error raised while operating on `path`.
    pub fn from_io(err: io::Error, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => IofsError::NotFound(path),
            io::ErrorKind::PermissionDenied => IofsError::PermissionDenied(path),
            _ => IofsError::Io { path, source: err },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, IofsError::NotFound(_))
    }

    pub fn is_cross_device(&self) -> bool {
        matches!(self, IofsError::CrossDevice { .. })
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, IofsError::PermissionDenied(_))
    }

    /// The path the failure refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            IofsError::NotFound(p) | IofsError::PermissionDenied(p) => Some(p),
            IofsError::CrossDevice { from, .. } => Some(from),
            IofsError::Io { path, .. } => Some(path),
            IofsError::Configuration(_) | IofsError::Encoding(_) | IofsError::Unsupported(_) => None,
        }
    }
}
