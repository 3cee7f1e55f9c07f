//! Core type definitions for dirsync

mod action;
mod error;
mod outcome;

pub use action::SyncAction;
pub use error::MirrorError;
pub use outcome::{OutcomeCounts, SyncFailure, SyncOutcome};
