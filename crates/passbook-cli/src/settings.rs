//! Layered configuration: an optional TOML file, then `PASSBOOK_*`
//! environment variables. Command-line flags override both.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// File read when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG: &str = "passbook.toml";

/// How reports are printed.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
  #[default]
  Text,
  Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Snapshot document to reconcile against.
  #[serde(default)]
  pub snapshot:  Option<PathBuf>,
  /// Fallback log filter when `RUST_LOG` is unset.
  #[serde(default = "default_log_level")]
  pub log_level: String,
  #[serde(default)]
  pub format:    Format,
}

fn default_log_level() -> String { "info".to_string() }

impl Settings {
  /// Load settings. An explicitly named file must exist; the default one
  /// may be absent.
  pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
    let file = match path {
      Some(path) => config::File::from(path).required(true),
      None => config::File::with_name(DEFAULT_CONFIG).required(false),
    };

    config::Config::builder()
      .add_source(file)
      .add_source(config::Environment::with_prefix("PASSBOOK"))
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise Settings")
  }
}
