//! Command-line arguments

use super::Config;
use crate::types::MirrorError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Mirror a directory tree one way, reporting every file touched
#[derive(Debug, Parser)]
#[command(name = "dirsync", version, about, long_about = None)]
pub struct Cli {
    /// Log every action to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Make DESTINATION's files match SOURCE's, recursively
    Sync(SyncArgs),

    /// Delete every hidden file below ROOT
    PurgeHidden(PurgeArgs),
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Directory to mirror from (overrides the config file)
    pub source: Option<PathBuf>,

    /// Directory to mirror into (overrides the config file)
    pub destination: Option<PathBuf>,

    /// TOML file with `source`, `destination`, `dry_run`, `show_progress`
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report what would change without touching the destination
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Hide the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Print the outcome as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PurgeArgs {
    /// Directory tree to clean
    pub root: PathBuf,

    /// Report what would be deleted without deleting
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the outcome as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

impl TryFrom<&SyncArgs> for Config {
    type Error = MirrorError;

    /// Merge the config file (if any) with CLI overrides.
    ///
    /// Paths are not checked here; [`crate::commands::sync::run`] validates
    /// before walking.
    fn try_from(args: &SyncArgs) -> Result<Self, Self::Error> {
        let mut config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(source) = &args.source {
            config.source = source.clone();
        }
        if let Some(destination) = &args.destination {
            config.destination = destination.clone();
        }
        if args.dry_run {
            config.dry_run = true;
        }
        if args.no_progress || args.json {
            config.show_progress = false;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sync_args(cli: Cli) -> SyncArgs {
        match cli.command {
            Command::Sync(args) => args,
            other => panic!("expected sync command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_sync_with_flags() {
        let cli = Cli::try_parse_from(["dirsync", "-v", "sync", "a", "b", "--dry-run", "--json"])
            .expect("parse");
        assert!(cli.verbose);

        let args = sync_args(cli);
        assert_eq!(args.source, Some(PathBuf::from("a")));
        assert_eq!(args.destination, Some(PathBuf::from("b")));
        assert!(args.dry_run);
        assert!(args.json);
    }

    #[test]
    fn test_parse_purge_hidden() {
        let cli = Cli::try_parse_from(["dirsync", "purge-hidden", "/data", "-n"]).expect("parse");
        match cli.command {
            Command::PurgeHidden(args) => {
                assert_eq!(args.root, PathBuf::from("/data"));
                assert!(args.dry_run);
            }
            other => panic!("expected purge-hidden, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let temp = TempDir::new().expect("create temp dir");
        let src = temp.path().join("src");
        let other = temp.path().join("other");
        fs::create_dir(&src).expect("create src");
        fs::create_dir(&other).expect("create other");

        let config_path = temp.path().join("dirsync.toml");
        fs::write(
            &config_path,
            format!(
                "source = {:?}\ndestination = {:?}\n",
                other.display().to_string(),
                temp.path().join("dst").display().to_string()
            ),
        )
        .expect("write config");

        let args = SyncArgs {
            source: Some(src.clone()),
            destination: None,
            config: Some(config_path),
            dry_run: true,
            no_progress: false,
            json: true,
        };

        let config = Config::try_from(&args).expect("valid config");
        assert_eq!(config.source, src);
        assert_eq!(config.destination, temp.path().join("dst"));
        assert!(config.dry_run);
        assert!(!config.show_progress, "json output disables the spinner");
    }

    #[test]
    fn test_try_from_leaves_validation_to_the_command() {
        let temp = TempDir::new().expect("create temp dir");
        let args = SyncArgs {
            source: Some(temp.path().join("missing")),
            destination: Some(temp.path().join("dst")),
            config: None,
            dry_run: false,
            no_progress: true,
            json: false,
        };

        let config = Config::try_from(&args).expect("paths are not touched yet");
        assert_eq!(config.source, temp.path().join("missing"));

        let err = crate::commands::sync::run(&config).expect_err("source is missing");
        assert!(err.is_source_error());
    }
}
