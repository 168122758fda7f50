//! SQL schema for the Q&A SQLite store.
//!
//! Executed when a store opens, unless `init_schema` is turned off in
//! [`crate::StoreConfig`].

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Foreign keys are declared but only enforced when the connection has
/// `PRAGMA foreign_keys = ON`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    fname TEXT NOT NULL,
    lname TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS questions (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    title     TEXT    NOT NULL,
    body      TEXT    NOT NULL,
    author_id INTEGER NOT NULL REFERENCES users(id)
);

CREATE TABLE IF NOT EXISTS question_follows (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id),
    question_id INTEGER NOT NULL REFERENCES questions(id),
    UNIQUE (user_id, question_id)
);

-- parent_reply_id is NULL for top-level replies.
CREATE TABLE IF NOT EXISTS replies (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    question_id     INTEGER NOT NULL REFERENCES questions(id),
    parent_reply_id INTEGER          REFERENCES replies(id),
    author_id       INTEGER NOT NULL REFERENCES users(id),
    body            TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS question_likes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id),
    question_id INTEGER NOT NULL REFERENCES questions(id),
    UNIQUE (user_id, question_id)
);

CREATE INDEX IF NOT EXISTS questions_author_idx   ON questions(author_id);
CREATE INDEX IF NOT EXISTS follows_question_idx   ON question_follows(question_id);
CREATE INDEX IF NOT EXISTS replies_question_idx   ON replies(question_id);
CREATE INDEX IF NOT EXISTS replies_parent_idx     ON replies(parent_reply_id);
CREATE INDEX IF NOT EXISTS replies_author_idx     ON replies(author_id);
CREATE INDEX IF NOT EXISTS likes_question_idx     ON question_likes(question_id);

PRAGMA user_version = 1;
";
