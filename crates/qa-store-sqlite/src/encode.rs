//! Decoding `rusqlite` rows into record types.
//!
//! Columns are read by name, so every query that feeds one of these mappers
//! must expose the table's columns under their plain names (join queries
//! alias them with `AS`).

use qa_core::{Follow, Like, Question, Reply, User};
use rusqlite::Row;

// ─── Row mappers ─────────────────────────────────────────────────────────────

pub fn decode_user(row: &Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:    row.get::<_, i64>("id")?.into(),
    fname: row.get("fname")?,
    lname: row.get("lname")?,
  })
}

pub fn decode_question(row: &Row<'_>) -> rusqlite::Result<Question> {
  Ok(Question {
    id:        row.get::<_, i64>("id")?.into(),
    title:     row.get("title")?,
    body:      row.get("body")?,
    author_id: row.get::<_, i64>("author_id")?.into(),
  })
}

pub fn decode_follow(row: &Row<'_>) -> rusqlite::Result<Follow> {
  Ok(Follow {
    id:          row.get::<_, i64>("id")?.into(),
    user_id:     row.get::<_, i64>("user_id")?.into(),
    question_id: row.get::<_, i64>("question_id")?.into(),
  })
}

pub fn decode_reply(row: &Row<'_>) -> rusqlite::Result<Reply> {
  Ok(Reply {
    id:              row.get::<_, i64>("id")?.into(),
    question_id:     row.get::<_, i64>("question_id")?.into(),
    parent_reply_id: row
      .get::<_, Option<i64>>("parent_reply_id")?
      .map(Into::into),
    author_id:       row.get::<_, i64>("author_id")?.into(),
    body:            row.get("body")?,
  })
}

pub fn decode_like(row: &Row<'_>) -> rusqlite::Result<Like> {
  Ok(Like {
    id:          row.get::<_, i64>("id")?.into(),
    user_id:     row.get::<_, i64>("user_id")?.into(),
    question_id: row.get::<_, i64>("question_id")?.into(),
  })
}

// ─── Parameters ──────────────────────────────────────────────────────────────

/// SQLite `LIMIT` takes a signed integer; clamp absurd `usize` values.
pub fn encode_limit(n: usize) -> i64 { i64::try_from(n).unwrap_or(i64::MAX) }

/// `COUNT(*)` comes back signed but is never negative.
pub fn decode_count(count: i64) -> u64 { u64::try_from(count).unwrap_or(0) }
