//! Human-readable rendering of sync and purge outcomes

use crate::purge::PurgeOutcome;
use crate::types::{SyncFailure, SyncOutcome};
use console::style;
use indicatif::HumanCount;
use std::collections::BTreeMap;

const FAILURES_SHOWN_PER_KIND: usize = 3;

fn count(n: usize) -> HumanCount {
    HumanCount(n as u64)
}

/// Category counts of a sync
pub fn format_sync_summary(outcome: &SyncOutcome, dry_run: bool) -> String {
    let counts = outcome.counts();
    let title = if dry_run {
        "Sync summary (dry run, nothing changed):"
    } else {
        "Sync summary:"
    };

    let mut lines = vec![
        style(title).bold().to_string(),
        format!(
            "  Directories: {} created, {} not created, {} not synced",
            count(counts.directories_created),
            count(counts.directories_not_created),
            count(counts.directories_not_synced)
        ),
        format!(
            "  Files:       {} added, {} updated, {} deleted, {} unchanged",
            count(counts.files_added),
            count(counts.files_updated),
            count(counts.files_deleted),
            count(counts.files_not_updated)
        ),
        format!(
            "  Failed:      {} not added, {} not updated, {} not deleted",
            count(counts.files_not_added),
            count(counts.files_update_failed),
            count(counts.files_not_deleted)
        ),
    ];

    if outcome.is_unchanged() {
        lines.push("  Destination already up to date.".to_string());
    }

    lines.join("\n")
}

/// Failures grouped by category, a few paths each. `None` when clean.
pub fn format_failure_details(outcome: &SyncOutcome) -> Option<String> {
    format_grouped_failures(outcome.failures())
}

pub fn format_purge_summary(outcome: &PurgeOutcome, dry_run: bool) -> String {
    let verb = if dry_run { "would be deleted" } else { "deleted" };
    let mut lines = vec![format!(
        "{} {} hidden file(s) {}, {} not deleted, {} director(ies) not read",
        style("Purge:").bold(),
        count(outcome.files_deleted.len()),
        verb,
        count(outcome.files_not_deleted.len()),
        count(outcome.directories_not_read.len())
    )];

    let failures = outcome
        .files_not_deleted
        .iter()
        .map(|f| ("File not deleted", f))
        .chain(
            outcome
                .directories_not_read
                .iter()
                .map(|f| ("Directory not read", f)),
        );
    if let Some(details) = format_grouped_failures(failures) {
        lines.push(details);
    }

    lines.join("\n")
}

fn format_grouped_failures<'a>(
    failures: impl Iterator<Item = (&'static str, &'a SyncFailure)>,
) -> Option<String> {
    let mut groups: BTreeMap<&'static str, Vec<&SyncFailure>> = BTreeMap::new();
    for (kind, failure) in failures {
        groups.entry(kind).or_default().push(failure);
    }

    if groups.is_empty() {
        return None;
    }

    let mut lines = vec![style("Failures:").red().bold().to_string()];
    for (kind, items) in groups {
        lines.push(format!("  {} ({}):", kind, items.len()));
        for failure in items.iter().take(FAILURES_SHOWN_PER_KIND) {
            lines.push(format!("    - {}", failure.path.display()));
            lines.push(format!("      Reason: {}", failure.reason));
        }
        if items.len() > FAILURES_SHOWN_PER_KIND {
            lines.push(format!(
                "    - ... {} more",
                items.len() - FAILURES_SHOWN_PER_KIND
            ));
        }
    }
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_summary_contains_category_counts() {
        let outcome = SyncOutcome {
            directories_created: vec![PathBuf::from("dst/sub")],
            files_added: vec![PathBuf::from("dst/a"), PathBuf::from("dst/b")],
            files_deleted: vec![PathBuf::from("dst/old")],
            files_not_updated: vec![PathBuf::from("dst/same")],
            ..SyncOutcome::default()
        };

        let summary = format_sync_summary(&outcome, false);
        assert!(summary.contains("Sync summary:"));
        assert!(summary.contains("1 created"));
        assert!(summary.contains("2 added"));
        assert!(summary.contains("1 deleted"));
        assert!(summary.contains("1 unchanged"));
        assert!(!summary.contains("up to date"));
    }

    #[test]
    fn test_summary_marks_dry_run_and_up_to_date() {
        let outcome = SyncOutcome {
            files_not_updated: vec![PathBuf::from("dst/same")],
            ..SyncOutcome::default()
        };

        let summary = format_sync_summary(&outcome, true);
        assert!(summary.contains("dry run"));
        assert!(summary.contains("already up to date"));
    }

    #[test]
    fn test_failure_details_none_when_clean() {
        assert!(format_failure_details(&SyncOutcome::default()).is_none());
    }

    #[test]
    fn test_failure_details_group_and_truncate() {
        let outcome = SyncOutcome {
            files_not_deleted: (0..5)
                .map(|i| SyncFailure::new(format!("dst/busy{i}.txt"), "in use"))
                .collect(),
            files_not_added: vec![SyncFailure::new("dst/new.txt", "disk full")],
            ..SyncOutcome::default()
        };

        let details = format_failure_details(&outcome).expect("has failures");
        assert!(details.contains("File not deleted (5):"));
        assert!(details.contains("File not added (1):"));
        assert!(details.contains("dst/busy0.txt"));
        assert!(!details.contains("dst/busy4.txt"));
        assert!(details.contains("... 2 more"));
        assert!(details.contains("Reason: disk full"));
    }

    #[test]
    fn test_purge_summary_lists_failures() {
        let outcome = PurgeOutcome {
            files_deleted: vec![PathBuf::from(".a")],
            files_not_deleted: vec![SyncFailure::new(".locked", "in use")],
            directories_not_read: vec![],
        };

        let summary = format_purge_summary(&outcome, false);
        assert!(summary.contains("1 hidden file(s) deleted"));
        assert!(summary.contains("1 not deleted"));
        assert!(summary.contains("File not deleted (1):"));

        let dry = format_purge_summary(&outcome, true);
        assert!(dry.contains("would be deleted"));
    }
}
