//! Per-level reconciliation of a source and a destination file listing

use crate::fs::{name_key, FileSystem};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Drop source files whose attributes mark them hidden.
///
/// A file whose attributes cannot be read is kept; the copy attempt that
/// follows will fail and be recorded instead of the file vanishing from
/// the report.
pub fn visible_files<F: FileSystem + ?Sized>(fs: &F, files: Vec<PathBuf>) -> Vec<PathBuf> {
    files
        .into_iter()
        .filter(|file| match fs.attributes(file) {
            Ok(attributes) => {
                if attributes.hidden {
                    tracing::debug!(path = %file.display(), "ignoring hidden source file");
                }
                !attributes.hidden
            }
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "cannot read attributes, treating as visible");
                true
            }
        })
        .collect()
}

/// Destination files of one directory, paired one-to-one with source files.
///
/// Exact names are claimed first. A source file without an exact
/// counterpart then takes the first unclaimed destination file with the
/// same case-insensitive name. Whatever is left unclaimed is an orphan, so
/// on case-sensitive volumes `README.md` is deleted when only `Readme.md`
/// exists in the source, and `A.txt` is added next to an existing `a.txt`.
#[derive(Debug, Default)]
pub struct DestinationPartition {
    /// No source counterpart: to be deleted
    pub orphans: Vec<PathBuf>,
    /// Source file → the destination file it updates
    retained: HashMap<PathBuf, PathBuf>,
}

impl DestinationPartition {
    pub fn split(source_files: &[PathBuf], destination_files: Vec<PathBuf>) -> Self {
        let mut by_name: HashMap<OsString, usize> = HashMap::new();
        let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, file) in destination_files.iter().enumerate() {
            if let Some(name) = file.file_name() {
                by_name.insert(name.to_os_string(), index);
            }
            by_key.entry(name_key(file)).or_default().push(index);
        }

        let mut claimed = vec![false; destination_files.len()];
        let mut pairs: Vec<(&PathBuf, usize)> = Vec::new();
        let mut unpaired: Vec<&PathBuf> = Vec::new();

        for source in source_files {
            let exact = source.file_name().and_then(|name| by_name.get(name));
            match exact {
                Some(&index) if !claimed[index] => {
                    claimed[index] = true;
                    pairs.push((source, index));
                }
                _ => unpaired.push(source),
            }
        }

        for source in unpaired {
            let Some(candidates) = by_key.get(&name_key(source)) else {
                continue;
            };
            if let Some(&index) = candidates.iter().find(|&&index| !claimed[index]) {
                claimed[index] = true;
                pairs.push((source, index));
            }
        }

        let mut slots: Vec<Option<PathBuf>> = destination_files.into_iter().map(Some).collect();
        let mut partition = Self::default();
        for (source, index) in pairs {
            if let Some(destination) = slots[index].take() {
                partition.retained.insert(source.clone(), destination);
            }
        }
        partition.orphans = slots.into_iter().flatten().collect();
        partition
    }

    /// Destination file paired with `source_file`, if any.
    pub fn retained_match(&self, source_file: &Path) -> Option<&Path> {
        self.retained.get(source_file).map(PathBuf::as_path)
    }

    pub fn retained_count(&self) -> usize {
        self.retained.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_split_separates_orphans_from_matches() {
        let source = paths(&["/src/a.txt", "/src/b.txt"]);
        let destination = paths(&["/dst/a.txt", "/dst/old.txt"]);

        let partition = DestinationPartition::split(&source, destination);

        assert_eq!(partition.orphans, paths(&["/dst/old.txt"]));
        assert_eq!(partition.retained_count(), 1);
        assert_eq!(
            partition.retained_match(Path::new("/src/a.txt")),
            Some(Path::new("/dst/a.txt"))
        );
        assert_eq!(partition.retained_match(Path::new("/src/b.txt")), None);
    }

    #[test]
    fn test_split_matches_names_case_insensitively() {
        let source = paths(&["/src/Photo.JPG"]);
        let destination = paths(&["/dst/photo.jpg"]);

        let partition = DestinationPartition::split(&source, destination);

        assert!(partition.orphans.is_empty());
        assert_eq!(
            partition.retained_match(Path::new("/src/Photo.JPG")),
            Some(Path::new("/dst/photo.jpg"))
        );
    }

    #[test]
    fn test_exact_case_wins_and_other_spelling_is_orphaned() {
        let source = paths(&["/src/Readme.md"]);
        let destination = paths(&["/dst/README.md", "/dst/Readme.md"]);

        let partition = DestinationPartition::split(&source, destination);

        assert_eq!(partition.retained_count(), 1);
        assert_eq!(
            partition.retained_match(Path::new("/src/Readme.md")),
            Some(Path::new("/dst/Readme.md"))
        );
        assert_eq!(partition.orphans, paths(&["/dst/README.md"]));
    }

    #[test]
    fn test_case_variants_in_source_do_not_share_a_destination() {
        let source = paths(&["/src/A.txt", "/src/a.txt"]);
        let destination = paths(&["/dst/a.txt"]);

        let partition = DestinationPartition::split(&source, destination);

        assert!(partition.orphans.is_empty());
        assert_eq!(
            partition.retained_match(Path::new("/src/a.txt")),
            Some(Path::new("/dst/a.txt"))
        );
        assert_eq!(partition.retained_match(Path::new("/src/A.txt")), None);
    }

    #[test]
    fn test_each_case_variant_pairs_with_one_destination() {
        let source = paths(&["/src/NOTES", "/src/Notes"]);
        let destination = paths(&["/dst/notes", "/dst/NOTES"]);

        let partition = DestinationPartition::split(&source, destination);

        assert!(partition.orphans.is_empty());
        assert_eq!(
            partition.retained_match(Path::new("/src/NOTES")),
            Some(Path::new("/dst/NOTES"))
        );
        assert_eq!(
            partition.retained_match(Path::new("/src/Notes")),
            Some(Path::new("/dst/notes"))
        );
    }

    #[test]
    fn test_empty_source_orphans_everything() {
        let destination = paths(&["/dst/x", "/dst/y"]);

        let partition = DestinationPartition::split(&[], destination.clone());

        assert_eq!(partition.orphans, destination);
        assert_eq!(partition.retained_count(), 0);
    }

    #[test]
    fn test_empty_destination_has_nothing_to_delete() {
        let source = paths(&["/src/a"]);
        let partition = DestinationPartition::split(&source, Vec::new());

        assert!(partition.orphans.is_empty());
        assert!(partition.retained_match(Path::new("/src/a")).is_none());
    }
}
