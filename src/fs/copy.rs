//! Atomic file copy implementation

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Suffix of the temporary file a copy is staged in
pub const PART_SUFFIX: &str = ".dirsync-part";

const BUFFER_SIZE: usize = 128 * 1024;

/// Copy a file atomically using the write-then-rename strategy
///
/// 1. Stream `src` into a fresh `.<name>.XXXXXX.dirsync-part` next to the target
/// 2. Flush and sync to disk
/// 3. Preserve mtime and permissions
/// 4. Rename over `dest`, replacing any existing file
///
/// The staging file is created exclusively with a random component, so it
/// never replaces an existing file of the same name. The parent of `dest`
/// must exist; it is never created here. On failure the staging file is
/// removed and `dest` is left as it was.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
///
/// # Example
/// ```no_run
/// use dirsync::fs::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(Path::new("source.txt"), Path::new("dest.txt"))?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> io::Result<u64> {
    let mut src_file = File::open(src)?;
    let mut part = staging_file(dest)?;

    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }

        part.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    part.as_file().sync_all()?;

    // mtime first: a read-only part file rejects time updates on Windows
    let src_metadata = src_file.metadata()?;
    let mtime = filetime::FileTime::from_last_modification_time(&src_metadata);
    filetime::set_file_mtime(part.path(), mtime)?;
    fs::set_permissions(part.path(), src_metadata.permissions())?;

    // Dropping `part` on any earlier return deletes the staging file.
    part.persist(dest).map_err(|e| e.error)?;

    Ok(total_bytes)
}

/// Exclusive staging file in the directory of `dest`
fn staging_file(dest: &Path) -> io::Result<NamedTempFile> {
    let name = dest.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("destination has no file name: {}", dest.display()),
        )
    })?;
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut prefix = OsString::from(".");
    prefix.push(name);
    prefix.push(".");

    tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(PART_SUFFIX)
        .tempfile_in(dir)
}
