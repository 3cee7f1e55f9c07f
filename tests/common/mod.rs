//! Shared helpers for integration tests.
#![allow(dead_code)]

use dirsync::fs::FileAttributes;
use dirsync::{FileSystem, LocalFs, OutcomeCounts, SyncOutcome};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// [`LocalFs`] with injectable per-name failures.
///
/// Faults are keyed by file or directory *name*, so a fault registered for
/// `busy.txt` fires wherever in the tree that name shows up.
#[derive(Debug, Default)]
pub struct FaultyFs {
    inner: LocalFs,
    fail_create: HashSet<String>,
    fail_delete: HashSet<String>,
    fail_copy_from: HashSet<String>,
    fail_copy_to: HashSet<String>,
    fail_list: HashSet<String>,
    fail_size: HashSet<String>,
}

impl FaultyFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_create(mut self, name: &str) -> Self {
        self.fail_create.insert(name.to_string());
        self
    }

    pub fn fail_delete(mut self, name: &str) -> Self {
        self.fail_delete.insert(name.to_string());
        self
    }

    /// Reading this source file fails, like a file held open exclusively.
    pub fn fail_copy_from(mut self, name: &str) -> Self {
        self.fail_copy_from.insert(name.to_string());
        self
    }

    pub fn fail_copy_to(mut self, name: &str) -> Self {
        self.fail_copy_to.insert(name.to_string());
        self
    }

    pub fn fail_list(mut self, name: &str) -> Self {
        self.fail_list.insert(name.to_string());
        self
    }

    pub fn fail_size(mut self, name: &str) -> Self {
        self.fail_size.insert(name.to_string());
        self
    }

    fn check(set: &HashSet<String>, path: &Path) -> io::Result<()> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if set.contains(&name) {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("injected fault on {name}"),
            ))
        } else {
            Ok(())
        }
    }
}

impl FileSystem for FaultyFs {
    fn directory_exists(&self, path: &Path) -> bool {
        self.inner.directory_exists(path)
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        Self::check(&self.fail_create, path)?;
        self.inner.create_directory(path)
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        Self::check(&self.fail_list, path)?;
        self.inner.list_files(path)
    }

    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        Self::check(&self.fail_list, path)?;
        self.inner.list_subdirectories(path)
    }

    fn attributes(&self, path: &Path) -> io::Result<FileAttributes> {
        self.inner.attributes(path)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Self::check(&self.fail_size, path)?;
        self.inner.file_size(path)
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        Self::check(&self.fail_delete, path)?;
        self.inner.delete_file(path)
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<u64> {
        Self::check(&self.fail_copy_from, src)?;
        Self::check(&self.fail_copy_to, dst)?;
        self.inner.copy_file(src, dst)
    }
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(&path, content).expect("write test file");
}

/// Every file below `root`, as sorted `/`-separated relative paths.
pub fn relative_files(root: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries {
            let path = entry.expect("read dir entry").path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let relative = path.strip_prefix(root).expect("path under root");
                let parts: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                out.push(parts.join("/"));
            }
        }
    }

    let mut files = Vec::new();
    walk(root, root, &mut files);
    files.sort();
    files
}

/// Assert per-category counts; categories not named must be zero.
pub fn assert_counts(outcome: &SyncOutcome, expected: OutcomeCounts) {
    assert_eq!(
        outcome.counts(),
        expected,
        "unexpected outcome: {outcome:#?}"
    );
}
