//! Store configuration, layered from defaults, an optional TOML file and
//! `QA_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

/// Path used when nothing else is configured.
pub const DEFAULT_PATH: &str = "questions.db";

/// How to open a [`crate::SqliteStore`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
  /// Database file; `:memory:` opens a private in-memory database.
  pub path:                 PathBuf,
  /// Turn on `PRAGMA foreign_keys` for the connection.
  pub enforce_foreign_keys: bool,
  /// Run the idempotent schema DDL on open.
  pub init_schema:          bool,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      path:                 PathBuf::from(DEFAULT_PATH),
      enforce_foreign_keys: false,
      init_schema:          true,
    }
  }
}

impl StoreConfig {
  /// Load configuration from `file` (if given and present) overlaid with
  /// `QA_PATH`, `QA_ENFORCE_FOREIGN_KEYS` and `QA_INIT_SCHEMA`.
  pub fn load(file: Option<&Path>) -> Result<Self> {
    let mut builder = ::config::Config::builder();
    if let Some(file) = file {
      builder = builder.add_source(::config::File::from(file).required(false));
    }
    let settings = builder
      .add_source(::config::Environment::with_prefix("QA"))
      .build()?;

    Ok(settings.try_deserialize()?)
  }

  pub fn in_memory() -> Self {
    Self { path: PathBuf::from(":memory:"), ..Self::default() }
  }

  pub fn is_in_memory(&self) -> bool { self.path.as_os_str() == ":memory:" }
}
