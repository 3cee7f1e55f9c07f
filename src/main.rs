use anyhow::Context;
use clap::Parser;
use dirsync::config::{Cli, Command, PurgeArgs, SyncArgs};
use dirsync::{commands, ui, Config};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Some items could not be processed; the rest of the tree was.
const EXIT_PARTIAL: u8 = 2;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let clean = match &cli.command {
        Command::Sync(args) => run_sync(args)?,
        Command::PurgeHidden(args) => run_purge(args)?,
    };

    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_PARTIAL)
    })
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` decides, and
/// without it nothing is logged.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dirsync=debug")
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => return,
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run_sync(args: &SyncArgs) -> anyhow::Result<bool> {
    let config = Config::try_from(args)?;

    let outcome = commands::sync::run(&config).with_context(|| {
        format!(
            "sync of {} to {} aborted",
            config.source.display(),
            config.destination.display()
        )
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", ui::format_sync_summary(&outcome, config.dry_run));
        if let Some(details) = ui::format_failure_details(&outcome) {
            println!("{details}");
        }
    }

    Ok(outcome.is_clean())
}

fn run_purge(args: &PurgeArgs) -> anyhow::Result<bool> {
    let outcome = commands::purge::run(&args.root, args.dry_run)
        .with_context(|| format!("purge of {} aborted", args.root.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", ui::format_purge_summary(&outcome, args.dry_run));
    }

    Ok(outcome.is_clean())
}
