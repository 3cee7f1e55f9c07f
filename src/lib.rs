//! # dirsync - One-way directory mirroring
//!
//! Makes a destination tree's files match a source tree's, recursively,
//! and reports what happened to every directory and file instead of
//! stopping at the first one that fails.
//!
//! Files are compared by size only. Hidden source files are treated as
//! absent. Destination-only subdirectories are left alone.

// Module declarations
pub mod commands;
pub mod config;
pub mod engine;
pub mod fs;
pub mod purge;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use engine::{SyncEngine, SyncEvent};
pub use fs::{DryRunFs, FileSystem, LocalFs};
pub use types::{MirrorError, OutcomeCounts, SyncAction, SyncFailure, SyncOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
