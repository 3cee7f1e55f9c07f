//! Filesystem primitives consumed by the sync engine
//!
//! Every mutating primitive returns its own `io::Result` so callers can
//! record a failure per item and keep going. The engine only ever talks to
//! the [`FileSystem`] trait; [`LocalFs`] is the real disk and [`DryRunFs`]
//! wraps another implementation to turn mutations into no-ops.

pub mod copy;
mod dry_run;
mod local;

pub use copy::copy_file_atomic;
pub use dry_run::DryRunFs;
pub use local::LocalFs;

use std::io;
use std::path::{Path, PathBuf};

/// Attributes the engine cares about for a single file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileAttributes {
    pub hidden: bool,
}

/// Directory-level filesystem operations used by the engine.
///
/// Listings are non-recursive and return full paths (`dir.join(name)`).
pub trait FileSystem {
    fn directory_exists(&self, path: &Path) -> bool;

    /// Create a single directory; the parent must already exist.
    fn create_directory(&self, path: &Path) -> io::Result<()>;

    /// Regular files directly inside `path`.
    ///
    /// Fails with `ErrorKind::NotFound` when `path` does not exist.
    fn list_files(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Directories directly inside `path`.
    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    fn attributes(&self, path: &Path) -> io::Result<FileAttributes>;

    fn file_size(&self, path: &Path) -> io::Result<u64>;

    fn delete_file(&self, path: &Path) -> io::Result<()>;

    /// Copy `src` to `dst`, replacing `dst` if it exists. Returns bytes copied.
    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<u64>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn directory_exists(&self, path: &Path) -> bool {
        (**self).directory_exists(path)
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        (**self).create_directory(path)
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).list_files(path)
    }

    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).list_subdirectories(path)
    }

    fn attributes(&self, path: &Path) -> io::Result<FileAttributes> {
        (**self).attributes(path)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        (**self).file_size(path)
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        (**self).delete_file(path)
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<u64> {
        (**self).copy_file(src, dst)
    }
}

/// Case-insensitive comparison key for a file name.
///
/// Destination files are matched to source files with this key so a
/// mirror onto a case-insensitive volume does not delete and re-add files
/// whose names differ only in case.
pub fn name_key(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}
