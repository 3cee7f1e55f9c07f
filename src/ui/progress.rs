//! Progress reporting

use crate::types::{OutcomeCounts, SyncAction};
use console::style;
use indicatif::{HumanBytes, HumanDuration, ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::{Duration, Instant};

/// Spinner shown while the engine walks the tree
pub struct ProgressReporter {
    bar: ProgressBar,
    started_at: Instant,
    transferred_bytes: u64,
    failures: u64,
}

impl ProgressReporter {
    /// Create a reporter; a disabled one draws nothing but still counts.
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new_spinner();
            bar.enable_steady_tick(Duration::from_millis(120));
            if let Ok(style) = ProgressStyle::with_template("{spinner} [{elapsed}] {pos} items | {msg}") {
                bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
            }
            bar
        } else {
            ProgressBar::hidden()
        };

        Self {
            bar,
            started_at: Instant::now(),
            transferred_bytes: 0,
            failures: 0,
        }
    }

    /// Show the directory currently being reconciled.
    pub fn start_directory(&self, source: &Path) {
        self.bar.set_message(format!(
            "{} | {}",
            source.display(),
            HumanBytes(self.transferred_bytes)
        ));
    }

    /// Count one recorded item.
    pub fn complete_item(&mut self, action: SyncAction, bytes: u64) {
        if action.is_transfer() {
            self.transferred_bytes = self.transferred_bytes.saturating_add(bytes);
        }
        self.bar.inc(1);
    }

    /// Print a failure above the spinner and count it.
    pub fn item_error(&mut self, action: SyncAction, path: &Path, reason: &str) {
        self.failures += 1;
        self.bar.inc(1);
        self.bar.println(format!(
            "{} {} {}: {}",
            style("ERROR").red().bold(),
            action.action_name(),
            path.display(),
            reason
        ));
    }

    /// Finalize the spinner with totals.
    pub fn finish(&self, counts: &OutcomeCounts) {
        self.bar.finish_with_message(format!(
            "Done in {}: {} changes, {} failures | {} copied",
            HumanDuration(self.started_at.elapsed()),
            counts.changes(),
            self.failures,
            HumanBytes(self.transferred_bytes)
        ));
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true)
    }
}
