//! Configuration management

mod cli;

pub use cli::{Cli, Command, PurgeArgs, SyncArgs};

use super::types::MirrorError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings for a single sync run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Source directory
    pub source: PathBuf,

    /// Destination directory
    pub destination: PathBuf,

    /// Report what would change without touching the destination
    pub dry_run: bool,

    /// Show a progress spinner while walking
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            dry_run: false,
            show_progress: true,
        }
    }
}

impl Config {
    /// Parse a TOML document
    ///
    /// ```
    /// use dirsync::Config;
    ///
    /// let config = Config::from_toml_str(r#"
    ///     source = "photos"
    ///     destination = "/mnt/backup/photos"
    /// "#)?;
    /// assert!(!config.dry_run);
    /// # Ok::<(), dirsync::MirrorError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, MirrorError> {
        toml::from_str(text).map_err(|e| MirrorError::Config(e.to_string()))
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self, MirrorError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            MirrorError::Config(format!("Cannot read config file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), MirrorError> {
        if self.source.as_os_str().is_empty() {
            return Err(MirrorError::Config("No source directory given".to_string()));
        }
        if self.destination.as_os_str().is_empty() {
            return Err(MirrorError::Config(
                "No destination directory given".to_string(),
            ));
        }

        if !self.source.is_dir() {
            return Err(MirrorError::SourceNotFound {
                path: self.source.clone(),
            });
        }

        let source = self.source.canonicalize()?;
        let destination = resolve_lexically(&self.destination)?;

        if source == destination {
            return Err(MirrorError::Validation(
                "Source and destination cannot be the same".to_string(),
            ));
        }

        // Each level would recreate the destination inside the tree being walked.
        if destination.starts_with(&source) {
            return Err(MirrorError::Validation(format!(
                "Destination {:?} is inside source {:?}",
                self.destination, self.source
            )));
        }

        Ok(())
    }
}

/// Absolute form of a path that may not exist yet: canonicalize the
/// longest existing ancestor and append the rest.
fn resolve_lexically(path: &Path) -> Result<PathBuf, MirrorError> {
    let absolute = std::path::absolute(path)?;

    let mut existing = absolute.as_path();
    let mut rest = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }

    let mut resolved = existing.canonicalize()?;
    resolved.extend(rest.iter().rev());
    Ok(resolved)
}
