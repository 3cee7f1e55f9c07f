//! Terminal output

mod progress;
pub mod summary;

pub use progress::ProgressReporter;
pub use summary::{format_failure_details, format_purge_summary, format_sync_summary};
