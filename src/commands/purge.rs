//! Hidden-file purge command

use crate::fs::{DryRunFs, LocalFs};
use crate::purge::{purge_hidden, PurgeOutcome};
use crate::types::MirrorError;
use std::path::Path;

/// Delete every hidden file below `root`, or only report them with `dry_run`.
pub fn run(root: &Path, dry_run: bool) -> Result<PurgeOutcome, MirrorError> {
    tracing::info!(root = %root.display(), dry_run, "purging hidden files");

    let outcome = if dry_run {
        purge_hidden(&DryRunFs::new(LocalFs), root)?
    } else {
        purge_hidden(&LocalFs, root)?
    };

    tracing::info!(
        deleted = outcome.files_deleted.len(),
        failed = outcome.files_not_deleted.len(),
        "purge finished"
    );
    Ok(outcome)
}
