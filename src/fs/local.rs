//! The real filesystem

use super::{copy_file_atomic, FileAttributes, FileSystem};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// [`FileSystem`] backed by `std::fs`.
///
/// Listings are sorted by path for stable output. Symlinks to files are
/// followed and treated as the file they point to; symlinks to directories
/// are not descended, which keeps link cycles from recursing forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Directory,
}

fn list_entries(dir: &Path, kind: EntryKind) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();

        let checked = match kind {
            EntryKind::Directory => entry.file_type().map(|file_type| file_type.is_dir()),
            EntryKind::File => fs::metadata(&path).map(|metadata| metadata.is_file()),
        };
        let matches = match checked {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                false
            }
        };

        if matches {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

#[cfg(windows)]
fn is_hidden(_path: &Path, metadata: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn is_hidden(path: &Path, _metadata: &fs::Metadata) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

impl FileSystem for LocalFs {
    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        list_entries(path, EntryKind::File)
    }

    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        list_entries(path, EntryKind::Directory)
    }

    fn attributes(&self, path: &Path) -> io::Result<FileAttributes> {
        let metadata = fs::metadata(path)?;
        Ok(FileAttributes {
            hidden: is_hidden(path, &metadata),
        })
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<u64> {
        copy_file_atomic(src, dst)
    }
}
