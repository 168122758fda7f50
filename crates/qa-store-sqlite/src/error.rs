//! Error type for `qa-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Any failure reported by SQLite: constraint violations, I/O, bad SQL.
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("config error: {0}")]
  Config(#[from] ::config::ConfigError),

  /// An update keyed by `id` matched no row in `table`.
  #[error("no row in {table} with id {id}")]
  RecordNotFound { table: &'static str, id: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
