//! Main sync command

use crate::engine::{SyncEngine, SyncEvent};
use crate::fs::{DryRunFs, FileSystem, LocalFs};
use crate::types::{MirrorError, SyncOutcome};
use crate::ui::ProgressReporter;
use crate::Config;
use std::sync::{Arc, Mutex};

/// Run the sync operation
///
/// Validates `config`, mirrors the source onto the destination (or only
/// reports what would happen with `dry_run`), and returns the outcome.
/// Per-item failures are part of the outcome, not an `Err`.
pub fn run(config: &Config) -> Result<SyncOutcome, MirrorError> {
    config.validate()?;

    tracing::info!(
        source = %config.source.display(),
        destination = %config.destination.display(),
        dry_run = config.dry_run,
        "starting sync"
    );

    let outcome = if config.dry_run {
        sync_with(&DryRunFs::new(LocalFs), config)?
    } else {
        sync_with(&LocalFs, config)?
    };

    tracing::info!(
        changes = outcome.counts().changes(),
        failures = outcome.counts().failures(),
        "sync finished"
    );
    Ok(outcome)
}

fn sync_with<F: FileSystem>(fs: &F, config: &Config) -> Result<SyncOutcome, MirrorError> {
    let reporter = Arc::new(Mutex::new(ProgressReporter::new(config.show_progress)));

    let progress_cb = {
        let reporter = Arc::clone(&reporter);
        move |event: &SyncEvent| {
            let Ok(mut progress) = reporter.lock() else {
                return;
            };
            match event {
                SyncEvent::DirectoryStarted { source, .. } => progress.start_directory(source),
                SyncEvent::ItemSucceeded {
                    action,
                    bytes_copied,
                    ..
                } => progress.complete_item(*action, *bytes_copied),
                SyncEvent::ItemFailed {
                    action,
                    path,
                    reason,
                } => progress.item_error(*action, path, reason),
                SyncEvent::Complete { counts } => progress.finish(counts),
            }
        }
    };

    SyncEngine::new(fs)
        .with_events(&progress_cb)
        .sync(&config.source, &config.destination)
}
