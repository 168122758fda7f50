//! SQLite backend for the Q&A store.
//!
//! [`SqliteStore`] owns a single [`rusqlite::Connection`] and implements
//! [`qa_core::QuestionStore`] on top of it. The handle is constructed once by
//! the caller and passed to every finder and accessor; there is no global
//! connection.

mod encode;
mod schema;
mod store;

pub mod config;
pub mod error;

pub use crate::config::StoreConfig;
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
