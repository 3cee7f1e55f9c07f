//! Sync engine - recursive one-way mirroring of a directory tree

mod reconcile;

pub use reconcile::{visible_files, DestinationPartition};

use crate::fs::FileSystem;
use crate::types::{MirrorError, OutcomeCounts, SyncAction, SyncFailure, SyncOutcome};
use std::io;
use std::path::{Path, PathBuf};

/// Events emitted while a sync walks the tree.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// A source directory is about to be reconciled.
    DirectoryStarted {
        source: PathBuf,
        destination: PathBuf,
    },
    /// An item was recorded in a success category.
    ItemSucceeded {
        action: SyncAction,
        path: PathBuf,
        bytes_copied: u64,
    },
    /// An item was recorded in a failure category; the walk continues.
    ItemFailed {
        action: SyncAction,
        path: PathBuf,
        reason: String,
    },
    /// The whole tree has been walked.
    Complete { counts: OutcomeCounts },
}

/// Optional callback used to receive sync events.
pub type SyncCallback = dyn Fn(&SyncEvent) + Send + Sync;

/// One directory level of the source, captured before anything is mutated
struct SourceLevel {
    files: Vec<PathBuf>,
    subdirectories: Vec<PathBuf>,
}

/// Mirrors a source tree onto a destination tree.
///
/// The engine holds no state between calls; each [`SyncEngine::sync`] is a
/// fresh walk. Per level it:
///
/// 1. snapshots the source files and subdirectories
/// 2. creates the destination directory if missing
/// 3. deletes destination files with no (visible) source counterpart
/// 4. adds missing files and overwrites files whose size differs
/// 5. recurses into every source subdirectory
///
/// Destination-only subdirectories are never visited or removed.
pub struct SyncEngine<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    on_event: Option<&'a SyncCallback>,
}

impl<'a, F: FileSystem + ?Sized> SyncEngine<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs, on_event: None }
    }

    pub fn with_events(mut self, on_event: &'a SyncCallback) -> Self {
        self.on_event = Some(on_event);
        self
    }

    /// Mirror `source` onto `destination`.
    ///
    /// # Errors
    /// Fails only when `source` itself cannot be listed. Everything below
    /// the root degrades to failure entries in the returned outcome.
    ///
    /// # Example
    /// ```no_run
    /// use dirsync::engine::SyncEngine;
    /// use dirsync::fs::LocalFs;
    /// use std::path::Path;
    ///
    /// let outcome = SyncEngine::new(&LocalFs).sync(Path::new("photos"), Path::new("/mnt/backup/photos"))?;
    /// println!("{} files added", outcome.files_added.len());
    /// # Ok::<(), dirsync::MirrorError>(())
    /// ```
    pub fn sync(&self, source: &Path, destination: &Path) -> Result<SyncOutcome, MirrorError> {
        let outcome = self.sync_directory(source, destination)?;
        self.emit(SyncEvent::Complete {
            counts: outcome.counts(),
        });
        Ok(outcome)
    }

    fn sync_directory(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<SyncOutcome, MirrorError> {
        let level = self.read_source(source)?;

        tracing::debug!(
            source = %source.display(),
            destination = %destination.display(),
            "syncing directory"
        );
        self.emit(SyncEvent::DirectoryStarted {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
        });

        let mut outcome = SyncOutcome::new();
        self.ensure_destination(destination, &mut outcome);

        let partition =
            DestinationPartition::split(&level.files, self.list_destination(destination));
        self.delete_orphans(&partition.orphans, &mut outcome);
        self.copy_files(&level.files, destination, &partition, &mut outcome);

        for subdirectory in &level.subdirectories {
            let Some(name) = subdirectory.file_name() else {
                continue;
            };
            let target = destination.join(name);

            match self.sync_directory(subdirectory, &target) {
                Ok(child) => outcome.merge(child),
                Err(e) => self.fail(
                    SyncAction::SyncDirectory,
                    subdirectory.clone(),
                    e,
                    &mut outcome.directories_not_synced,
                ),
            }
        }

        Ok(outcome)
    }

    fn read_source(&self, source: &Path) -> Result<SourceLevel, MirrorError> {
        let files = self
            .fs
            .list_files(source)
            .map_err(|e| MirrorError::from_source_listing(source, e))?;
        let subdirectories = self
            .fs
            .list_subdirectories(source)
            .map_err(|e| MirrorError::from_source_listing(source, e))?;

        Ok(SourceLevel {
            files: visible_files(self.fs, files),
            subdirectories,
        })
    }

    /// Create `destination` if missing. A failure is recorded and the level
    /// carries on; the file operations against it will fail on their own.
    fn ensure_destination(&self, destination: &Path, outcome: &mut SyncOutcome) {
        if self.fs.directory_exists(destination) {
            return;
        }

        let result = self.fs.create_directory(destination).map(|()| 0);
        self.settle(
            SyncAction::CreateDirectory,
            destination.to_path_buf(),
            result,
            &mut outcome.directories_created,
            &mut outcome.directories_not_created,
        );
    }

    fn list_destination(&self, destination: &Path) -> Vec<PathBuf> {
        match self.fs.list_files(destination) {
            Ok(files) => files,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    path = %destination.display(),
                    error = %e,
                    "cannot list destination, treating it as empty"
                );
                Vec::new()
            }
        }
    }

    fn delete_orphans(&self, orphans: &[PathBuf], outcome: &mut SyncOutcome) {
        for orphan in orphans {
            let result = self.fs.delete_file(orphan).map(|()| 0);
            self.settle(
                SyncAction::DeleteFile,
                orphan.clone(),
                result,
                &mut outcome.files_deleted,
                &mut outcome.files_not_deleted,
            );
        }
    }

    fn copy_files(
        &self,
        source_files: &[PathBuf],
        destination: &Path,
        partition: &DestinationPartition,
        outcome: &mut SyncOutcome,
    ) {
        for source_file in source_files {
            let Some(name) = source_file.file_name() else {
                continue;
            };

            let Some(existing) = partition.retained_match(source_file) else {
                let target = destination.join(name);
                let result = self.fs.copy_file(source_file, &target);
                self.settle(
                    SyncAction::AddFile,
                    target,
                    result,
                    &mut outcome.files_added,
                    &mut outcome.files_not_added,
                );
                continue;
            };

            let target = existing.to_path_buf();
            match self.sizes_differ(source_file, &target) {
                Ok(true) => {
                    let result = self.fs.copy_file(source_file, &target);
                    self.settle(
                        SyncAction::UpdateFile,
                        target,
                        result,
                        &mut outcome.files_updated,
                        &mut outcome.files_update_failed,
                    );
                }
                Ok(false) => self.succeed(
                    SyncAction::SkipFile,
                    target,
                    0,
                    &mut outcome.files_not_updated,
                ),
                Err(e) => self.fail(
                    SyncAction::UpdateFile,
                    target,
                    e,
                    &mut outcome.files_update_failed,
                ),
            }
        }
    }

    fn sizes_differ(&self, source_file: &Path, destination_file: &Path) -> io::Result<bool> {
        let source_size = self.fs.file_size(source_file)?;
        let destination_size = self.fs.file_size(destination_file)?;
        Ok(source_size != destination_size)
    }

    /// Route one item's result into its success or failure list.
    fn settle(
        &self,
        action: SyncAction,
        path: PathBuf,
        result: io::Result<u64>,
        done: &mut Vec<PathBuf>,
        failed: &mut Vec<SyncFailure>,
    ) {
        match result {
            Ok(bytes_copied) => self.succeed(action, path, bytes_copied, done),
            Err(e) => self.fail(action, path, e, failed),
        }
    }

    fn succeed(&self, action: SyncAction, path: PathBuf, bytes_copied: u64, done: &mut Vec<PathBuf>) {
        tracing::debug!(action = action.action_name(), path = %path.display(), "done");
        self.emit(SyncEvent::ItemSucceeded {
            action,
            path: path.clone(),
            bytes_copied,
        });
        done.push(path);
    }

    fn fail(
        &self,
        action: SyncAction,
        path: PathBuf,
        reason: impl std::fmt::Display,
        failed: &mut Vec<SyncFailure>,
    ) {
        let failure = SyncFailure::new(path, reason);
        tracing::warn!(
            action = action.action_name(),
            path = %failure.path.display(),
            error = %failure.reason,
            "failed"
        );
        self.emit(SyncEvent::ItemFailed {
            action,
            path: failure.path.clone(),
            reason: failure.reason.clone(),
        });
        failed.push(failure);
    }

    fn emit(&self, event: SyncEvent) {
        if let Some(callback) = self.on_event {
            callback(&event);
        }
    }
}
