//! Dry-run wrapper: reads hit the real filesystem, writes are skipped

use super::{FileAttributes, FileSystem};
use std::io;
use std::path::{Path, PathBuf};

/// Wraps a [`FileSystem`] and reports every mutation as successful
/// without performing it.
///
/// A copy still reads the source size so a vanished source file fails the
/// same way it would for real.
#[derive(Debug, Clone, Default)]
pub struct DryRunFs<F> {
    inner: F,
}

impl<F: FileSystem> DryRunFs<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: FileSystem> FileSystem for DryRunFs<F> {
    fn directory_exists(&self, path: &Path) -> bool {
        self.inner.directory_exists(path)
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        tracing::debug!(path = %path.display(), "dry-run: would create directory");
        Ok(())
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.inner.list_files(path)
    }

    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.inner.list_subdirectories(path)
    }

    fn attributes(&self, path: &Path) -> io::Result<FileAttributes> {
        self.inner.attributes(path)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        self.inner.file_size(path)
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        tracing::debug!(path = %path.display(), "dry-run: would delete file");
        Ok(())
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<u64> {
        let size = self.inner.file_size(src)?;
        tracing::debug!(src = %src.display(), dst = %dst.display(), "dry-run: would copy file");
        Ok(size)
    }
}
