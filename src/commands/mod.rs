//! Command entry points used by the binary

pub mod purge;
pub mod sync;
