//! `passbook`: reconcile lesson passes against attendance from the command
//! line.
//!
//! # Usage
//!
//! ```text
//! passbook --snapshot school.json reconcile --student anna --group piano-mon
//! passbook --snapshot school.json summary --today 2024-02-01
//! PASSBOOK_SNAPSHOT=school.json passbook fingerprint --student anna --group piano-mon
//! ```

mod commands;
mod report;
mod settings;

use std::{io, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use commands::Command;
use passbook_snapshot::Snapshot;
use settings::Settings;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
  name = "passbook",
  version,
  about = "Reconcile lesson passes against attendance"
)]
struct Cli {
  /// Path to a TOML config file (defaults to ./passbook.toml if present).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Snapshot document to read (overrides the configured one).
  #[arg(short, long, value_name = "FILE", env = "PASSBOOK_SNAPSHOT")]
  snapshot: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  // Load configuration.
  let settings = Settings::load(cli.config.as_deref())?;

  // Initialise tracing. Logs go to stderr; stdout carries the report.
  let filter = EnvFilter::try_from_default_env()
    .or_else(|_| EnvFilter::try_new(&settings.log_level))
    .with_context(|| format!("invalid log level {:?}", settings.log_level))?;
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();

  // Open the snapshot.
  let path = cli
    .snapshot
    .or_else(|| settings.snapshot.clone())
    .context("no snapshot given: pass --snapshot or set `snapshot` in the config")?;
  let snapshot = Snapshot::open(&path)
    .with_context(|| format!("failed to load snapshot {}", path.display()))?;

  let mut stdout = io::stdout().lock();
  commands::run(cli.command, &snapshot, settings.format, &mut stdout)
}
