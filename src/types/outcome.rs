//! SyncOutcome - categorized report of everything a sync touched

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A path that could not be processed, with the reason it failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl SyncFailure {
    pub fn new(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result of mirroring one directory subtree.
///
/// Each visited destination directory and each file lands in exactly one
/// list. Failure lists keep the underlying error message alongside the path.
/// List ordering follows traversal order and is not meaningful; only which
/// list a path ends up in is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub directories_created: Vec<PathBuf>,
    pub directories_not_created: Vec<SyncFailure>,

    pub files_deleted: Vec<PathBuf>,
    pub files_not_deleted: Vec<SyncFailure>,

    pub files_added: Vec<PathBuf>,
    pub files_not_added: Vec<SyncFailure>,

    /// Size differed and the destination was overwritten
    pub files_updated: Vec<PathBuf>,
    /// Size differed but the overwrite failed
    pub files_update_failed: Vec<SyncFailure>,
    /// Size matched, destination left untouched
    pub files_not_updated: Vec<PathBuf>,

    /// Source subdirectories that could not be listed mid-walk
    pub directories_not_synced: Vec<SyncFailure>,
}

impl SyncOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a subtree's outcome into this one.
    ///
    /// Pure concatenation per category, so merge order only affects list
    /// order, never counts or membership.
    pub fn merge(&mut self, other: SyncOutcome) {
        self.directories_created.extend(other.directories_created);
        self.directories_not_created
            .extend(other.directories_not_created);
        self.files_deleted.extend(other.files_deleted);
        self.files_not_deleted.extend(other.files_not_deleted);
        self.files_added.extend(other.files_added);
        self.files_not_added.extend(other.files_not_added);
        self.files_updated.extend(other.files_updated);
        self.files_update_failed.extend(other.files_update_failed);
        self.files_not_updated.extend(other.files_not_updated);
        self.directories_not_synced
            .extend(other.directories_not_synced);
    }

    pub fn counts(&self) -> OutcomeCounts {
        OutcomeCounts {
            directories_created: self.directories_created.len(),
            directories_not_created: self.directories_not_created.len(),
            files_deleted: self.files_deleted.len(),
            files_not_deleted: self.files_not_deleted.len(),
            files_added: self.files_added.len(),
            files_not_added: self.files_not_added.len(),
            files_updated: self.files_updated.len(),
            files_update_failed: self.files_update_failed.len(),
            files_not_updated: self.files_not_updated.len(),
            directories_not_synced: self.directories_not_synced.len(),
        }
    }

    /// True when nothing failed
    pub fn is_clean(&self) -> bool {
        self.counts().failures() == 0
    }

    /// True when the destination already matched the source
    pub fn is_unchanged(&self) -> bool {
        let counts = self.counts();
        counts.changes() == 0 && counts.failures() == 0
    }

    /// Every failure, labelled with the category it was recorded under
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &SyncFailure)> {
        self.directories_not_created
            .iter()
            .map(|f| ("Directory not created", f))
            .chain(
                self.directories_not_synced
                    .iter()
                    .map(|f| ("Directory not synced", f)),
            )
            .chain(self.files_not_deleted.iter().map(|f| ("File not deleted", f)))
            .chain(self.files_not_added.iter().map(|f| ("File not added", f)))
            .chain(
                self.files_update_failed
                    .iter()
                    .map(|f| ("File update failed", f)),
            )
    }

    /// Whether `path` was recorded in any category
    pub fn contains(&self, path: &Path) -> bool {
        let in_paths = |list: &[PathBuf]| list.iter().any(|p| p == path);
        let in_failures = |list: &[SyncFailure]| list.iter().any(|f| f.path == path);

        in_paths(&self.directories_created)
            || in_paths(&self.files_deleted)
            || in_paths(&self.files_added)
            || in_paths(&self.files_updated)
            || in_paths(&self.files_not_updated)
            || in_failures(&self.directories_not_created)
            || in_failures(&self.files_not_deleted)
            || in_failures(&self.files_not_added)
            || in_failures(&self.files_update_failed)
            || in_failures(&self.directories_not_synced)
    }
}

/// Per-category counts of a [`SyncOutcome`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub directories_created: usize,
    pub directories_not_created: usize,
    pub files_deleted: usize,
    pub files_not_deleted: usize,
    pub files_added: usize,
    pub files_not_added: usize,
    pub files_updated: usize,
    pub files_update_failed: usize,
    pub files_not_updated: usize,
    pub directories_not_synced: usize,
}

impl OutcomeCounts {
    /// Number of successful mutations of the destination
    pub fn changes(&self) -> usize {
        self.directories_created + self.files_deleted + self.files_added + self.files_updated
    }

    pub fn failures(&self) -> usize {
        self.directories_not_created
            + self.files_not_deleted
            + self.files_not_added
            + self.files_update_failed
            + self.directories_not_synced
    }
}
