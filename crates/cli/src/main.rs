//! bibmark command line.

use anyhow::{Context, Result};
use bibmark_import::{ImportSummary, Importer};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;

use args::{Cli, Command, ImportArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.default_filter());

    match &cli.command {
        Command::Import(args) => run_import(args),
    }
}

/// Installs the stderr subscriber; `log` records from the library crates are
/// forwarded to it.
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_import(args: &ImportArgs) -> Result<()> {
    let importer = Importer::new(args.to_config()).context("Invalid import options")?;
    if args.dry_run {
        log::warn!("Dry run: no files will be written");
    }

    let summary = importer
        .import_file(&args.input)
        .with_context(|| format!("Failed to import {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &ImportSummary) {
    println!(
        "Imported {} entries: {} written, {} skipped, {} failed ({} warnings) in {:.1} ms",
        summary.total,
        summary.written,
        summary.skipped,
        summary.failed,
        summary.warnings,
        summary.elapsed_ms
    );
}
