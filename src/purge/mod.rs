//! Hidden-file purge
//!
//! Walks a tree and deletes every file the filesystem reports as hidden.
//! Hidden directories are descended but never removed. Failures are
//! recorded per file and the walk continues, the same way the sync engine
//! treats them.

use crate::fs::FileSystem;
use crate::types::{MirrorError, SyncFailure};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result of a purge run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurgeOutcome {
    pub files_deleted: Vec<PathBuf>,
    pub files_not_deleted: Vec<SyncFailure>,
    /// Subdirectories that could not be listed
    pub directories_not_read: Vec<SyncFailure>,
}

impl PurgeOutcome {
    pub fn merge(&mut self, other: PurgeOutcome) {
        self.files_deleted.extend(other.files_deleted);
        self.files_not_deleted.extend(other.files_not_deleted);
        self.directories_not_read.extend(other.directories_not_read);
    }

    pub fn is_clean(&self) -> bool {
        self.files_not_deleted.is_empty() && self.directories_not_read.is_empty()
    }
}

/// Delete every hidden file below `root`.
///
/// # Errors
/// Fails only when `root` itself cannot be listed.
pub fn purge_hidden<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
) -> Result<PurgeOutcome, MirrorError> {
    purge_directory(fs, root)
}

fn purge_directory<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
) -> Result<PurgeOutcome, MirrorError> {
    let files = fs
        .list_files(dir)
        .map_err(|e| MirrorError::from_source_listing(dir, e))?;
    let subdirectories = fs
        .list_subdirectories(dir)
        .map_err(|e| MirrorError::from_source_listing(dir, e))?;

    let mut outcome = PurgeOutcome::default();

    for file in files {
        match fs.attributes(&file) {
            Ok(attributes) if attributes.hidden => {}
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "cannot read attributes, skipping");
                continue;
            }
        }

        match fs.delete_file(&file) {
            Ok(()) => {
                tracing::debug!(path = %file.display(), "deleted hidden file");
                outcome.files_deleted.push(file);
            }
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "cannot delete hidden file");
                outcome.files_not_deleted.push(SyncFailure::new(file, e));
            }
        }
    }

    for subdirectory in subdirectories {
        match purge_directory(fs, &subdirectory) {
            Ok(child) => outcome.merge(child),
            Err(e) => {
                tracing::warn!(path = %subdirectory.display(), error = %e, "cannot read directory");
                outcome
                    .directories_not_read
                    .push(SyncFailure::new(subdirectory, e));
            }
        }
    }

    Ok(outcome)
}
