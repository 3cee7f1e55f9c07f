//! Error types for dirsync

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a dirsync operation.
///
/// Per-item failures (a locked file, a directory that cannot be created)
/// never surface here; they are recorded in the outcome instead.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error (logic checks)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Source directory does not exist
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Source directory exists but cannot be listed
    #[error("Source directory unreadable: {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MirrorError {
    /// Map a failed listing of a source directory to the matching variant.
    pub fn from_source_listing(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        let path = path.into();
        if error.kind() == std::io::ErrorKind::NotFound {
            MirrorError::SourceNotFound { path }
        } else {
            MirrorError::SourceUnreadable {
                path,
                source: error,
            }
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, MirrorError::Validation(_) | MirrorError::Config(_))
    }

    /// Check if this error is caused by the source tree
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            MirrorError::SourceNotFound { .. } | MirrorError::SourceUnreadable { .. }
        )
    }
}
