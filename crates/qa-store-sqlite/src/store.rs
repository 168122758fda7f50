//! [`SqliteStore`] — the SQLite implementation of [`QuestionStore`].

use std::path::Path;

use qa_core::{
  Follow, FollowId, Like, LikeId, NewFollow, NewLike, NewQuestion, NewReply,
  NewUser, Question, QuestionId, QuestionStore, Reply, ReplyId, User, UserId,
};
use rusqlite::{Connection, OptionalExtension as _, Params, Row, params};

use crate::{
  Error, Result, StoreConfig,
  encode::{
    decode_count, decode_follow, decode_like, decode_question, decode_reply,
    decode_user, encode_limit,
  },
  schema::SCHEMA,
};

type RowMapper<T> = fn(&Row<'_>) -> rusqlite::Result<T>;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Q&A store backed by a single SQLite connection.
///
/// The handle is neither `Clone` nor `Sync`: one store means one connection,
/// used from one thread. Dropping the store closes the connection.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` with default settings.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::from_config(&StoreConfig {
      path: path.as_ref().to_path_buf(),
      ..StoreConfig::default()
    })
  }

  /// Open a private in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::from_config(&StoreConfig::in_memory())
  }

  /// Open a store as described by `config`.
  pub fn from_config(config: &StoreConfig) -> Result<Self> {
    let conn = if config.is_in_memory() {
      Connection::open_in_memory()?
    } else {
      Connection::open(&config.path)?
    };
    let store = Self { conn };

    // Set either way: bundled SQLite may be compiled with enforcement on.
    store
      .conn
      .pragma_update(None, "foreign_keys", config.enforce_foreign_keys)?;
    if config.init_schema {
      store.init_schema()?;
    }

    tracing::debug!(
      path = %config.path.display(),
      enforce_foreign_keys = config.enforce_foreign_keys,
      "opened store"
    );
    Ok(store)
  }

  /// Borrow the underlying connection, e.g. to seed data with raw SQL.
  pub fn connection(&self) -> &Connection { &self.conn }

  fn init_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA)?;
    Ok(())
  }

  /// Run `sql` and map every resulting row.
  fn fetch_all<T, P: Params>(
    &self,
    sql: &str,
    params: P,
    map: RowMapper<T>,
  ) -> Result<Vec<T>> {
    let mut stmt = self.conn.prepare(sql)?;
    let rows = stmt
      .query_map(params, map)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  /// Run `sql` and map the first row, if any.
  fn fetch_one<T, P: Params>(
    &self,
    sql: &str,
    params: P,
    map: RowMapper<T>,
  ) -> Result<Option<T>> {
    Ok(self.conn.query_row(sql, params, map).optional()?)
  }

  /// Turn an `UPDATE`'s affected-row count into a result.
  fn check_updated(table: &'static str, id: i64, changed: usize) -> Result<()> {
    if changed == 0 {
      tracing::warn!(table, id, "update matched no row");
      return Err(Error::RecordNotFound { table, id });
    }
    tracing::info!(table, id, "updated row");
    Ok(())
  }
}

// ─── QuestionStore impl ──────────────────────────────────────────────────────

impl QuestionStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  fn all_users(&self) -> Result<Vec<User>> {
    tracing::debug!(table = "users", "all");
    self.fetch_all(
      "SELECT id, fname, lname FROM users ORDER BY id",
      [],
      decode_user,
    )
  }

  fn user_by_id(&self, id: UserId) -> Result<Option<User>> {
    tracing::debug!(table = "users", %id, "find by id");
    self.fetch_one(
      "SELECT id, fname, lname FROM users WHERE id = ?1",
      params![id.get()],
      decode_user,
    )
  }

  fn users_by_name(&self, fname: &str, lname: &str) -> Result<Vec<User>> {
    tracing::debug!(table = "users", fname, lname, "find by name");
    self.fetch_all(
      "SELECT id, fname, lname FROM users
       WHERE fname = ?1 AND lname = ?2
       ORDER BY id",
      params![fname, lname],
      decode_user,
    )
  }

  fn insert_user(&self, new: NewUser) -> Result<User> {
    self.conn.execute(
      "INSERT INTO users (fname, lname) VALUES (?1, ?2)",
      params![new.fname, new.lname],
    )?;
    let id = UserId(self.conn.last_insert_rowid());
    tracing::info!(table = "users", %id, "inserted row");

    Ok(User { id, fname: new.fname, lname: new.lname })
  }

  fn update_user(&self, user: &User) -> Result<()> {
    let changed = self.conn.execute(
      "UPDATE users SET fname = ?1, lname = ?2 WHERE id = ?3",
      params![user.fname, user.lname, user.id.get()],
    )?;
    Self::check_updated("users", user.id.get(), changed)
  }

  fn average_karma(&self, user_id: UserId) -> Result<Option<f64>> {
    tracing::debug!(table = "question_likes", %user_id, "average karma");
    // AVG over zero groups is NULL, which maps to `None`.
    let karma: Option<f64> = self.conn.query_row(
      "SELECT AVG(like_count) FROM (
         SELECT COUNT(ql.id) AS like_count
         FROM questions q
         LEFT JOIN question_likes ql ON ql.question_id = q.id
         WHERE q.author_id = ?1
         GROUP BY q.id
       )",
      params![user_id.get()],
      |row| row.get(0),
    )?;
    Ok(karma)
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  fn all_questions(&self) -> Result<Vec<Question>> {
    tracing::debug!(table = "questions", "all");
    self.fetch_all(
      "SELECT id, title, body, author_id FROM questions ORDER BY id",
      [],
      decode_question,
    )
  }

  fn question_by_id(&self, id: QuestionId) -> Result<Option<Question>> {
    tracing::debug!(table = "questions", %id, "find by id");
    self.fetch_one(
      "SELECT id, title, body, author_id FROM questions WHERE id = ?1",
      params![id.get()],
      decode_question,
    )
  }

  fn questions_by_author_id(&self, author_id: UserId) -> Result<Vec<Question>> {
    tracing::debug!(table = "questions", %author_id, "find by author");
    self.fetch_all(
      "SELECT id, title, body, author_id FROM questions
       WHERE author_id = ?1
       ORDER BY id",
      params![author_id.get()],
      decode_question,
    )
  }

  fn insert_question(&self, new: NewQuestion) -> Result<Question> {
    self.conn.execute(
      "INSERT INTO questions (title, body, author_id) VALUES (?1, ?2, ?3)",
      params![new.title, new.body, new.author_id.get()],
    )?;
    let id = QuestionId(self.conn.last_insert_rowid());
    tracing::info!(table = "questions", %id, "inserted row");

    Ok(Question {
      id,
      title: new.title,
      body: new.body,
      author_id: new.author_id,
    })
  }

  fn update_question(&self, question: &Question) -> Result<()> {
    let changed = self.conn.execute(
      "UPDATE questions SET title = ?1, body = ?2, author_id = ?3 WHERE id = ?4",
      params![
        question.title,
        question.body,
        question.author_id.get(),
        question.id.get(),
      ],
    )?;
    Self::check_updated("questions", question.id.get(), changed)
  }

  // ── Follows ───────────────────────────────────────────────────────────────

  fn all_follows(&self) -> Result<Vec<Follow>> {
    tracing::debug!(table = "question_follows", "all");
    self.fetch_all(
      "SELECT id, user_id, question_id FROM question_follows ORDER BY id",
      [],
      decode_follow,
    )
  }

  fn follow_by_id(&self, id: FollowId) -> Result<Option<Follow>> {
    tracing::debug!(table = "question_follows", %id, "find by id");
    self.fetch_one(
      "SELECT id, user_id, question_id FROM question_follows WHERE id = ?1",
      params![id.get()],
      decode_follow,
    )
  }

  fn insert_follow(&self, new: NewFollow) -> Result<Follow> {
    self.conn.execute(
      "INSERT INTO question_follows (user_id, question_id) VALUES (?1, ?2)",
      params![new.user_id.get(), new.question_id.get()],
    )?;
    let id = FollowId(self.conn.last_insert_rowid());
    tracing::info!(table = "question_follows", %id, "inserted row");

    Ok(Follow { id, user_id: new.user_id, question_id: new.question_id })
  }

  fn update_follow(&self, follow: &Follow) -> Result<()> {
    let changed = self.conn.execute(
      "UPDATE question_follows SET user_id = ?1, question_id = ?2 WHERE id = ?3",
      params![follow.user_id.get(), follow.question_id.get(), follow.id.get()],
    )?;
    Self::check_updated("question_follows", follow.id.get(), changed)
  }

  fn followers_for_question_id(
    &self,
    question_id: QuestionId,
  ) -> Result<Vec<User>> {
    tracing::debug!(table = "question_follows", %question_id, "followers");
    self.fetch_all(
      "SELECT u.id AS id, u.fname AS fname, u.lname AS lname
       FROM users u
       JOIN question_follows qf ON qf.user_id = u.id
       WHERE qf.question_id = ?1
       ORDER BY qf.id",
      params![question_id.get()],
      decode_user,
    )
  }

  fn followed_questions_for_user_id(
    &self,
    user_id: UserId,
  ) -> Result<Vec<Question>> {
    tracing::debug!(table = "question_follows", %user_id, "followed questions");
    self.fetch_all(
      "SELECT q.id AS id, q.title AS title, q.body AS body,
              q.author_id AS author_id
       FROM questions q
       JOIN question_follows qf ON qf.question_id = q.id
       WHERE qf.user_id = ?1
       ORDER BY qf.id",
      params![user_id.get()],
      decode_question,
    )
  }

  fn most_followed_questions(&self, n: usize) -> Result<Vec<Question>> {
    tracing::debug!(table = "question_follows", n, "most followed");
    self.fetch_all(
      "SELECT q.id AS id, q.title AS title, q.body AS body,
              q.author_id AS author_id
       FROM questions q
       JOIN question_follows qf ON qf.question_id = q.id
       GROUP BY q.id
       ORDER BY COUNT(qf.id) DESC
       LIMIT ?1",
      params![encode_limit(n)],
      decode_question,
    )
  }

  // ── Replies ───────────────────────────────────────────────────────────────

  fn all_replies(&self) -> Result<Vec<Reply>> {
    tracing::debug!(table = "replies", "all");
    self.fetch_all(
      "SELECT id, question_id, parent_reply_id, author_id, body
       FROM replies
       ORDER BY id",
      [],
      decode_reply,
    )
  }

  fn reply_by_id(&self, id: ReplyId) -> Result<Option<Reply>> {
    tracing::debug!(table = "replies", %id, "find by id");
    self.fetch_one(
      "SELECT id, question_id, parent_reply_id, author_id, body
       FROM replies
       WHERE id = ?1",
      params![id.get()],
      decode_reply,
    )
  }

  fn replies_by_author_id(&self, author_id: UserId) -> Result<Vec<Reply>> {
    tracing::debug!(table = "replies", %author_id, "find by author");
    self.fetch_all(
      "SELECT id, question_id, parent_reply_id, author_id, body
       FROM replies
       WHERE author_id = ?1
       ORDER BY id",
      params![author_id.get()],
      decode_reply,
    )
  }

  fn replies_by_question_id(
    &self,
    question_id: QuestionId,
  ) -> Result<Vec<Reply>> {
    tracing::debug!(table = "replies", %question_id, "find by question");
    self.fetch_all(
      "SELECT id, question_id, parent_reply_id, author_id, body
       FROM replies
       WHERE question_id = ?1
       ORDER BY id",
      params![question_id.get()],
      decode_reply,
    )
  }

  fn child_replies(&self, parent_id: ReplyId) -> Result<Vec<Reply>> {
    tracing::debug!(table = "replies", %parent_id, "children");
    self.fetch_all(
      "SELECT id, question_id, parent_reply_id, author_id, body
       FROM replies
       WHERE parent_reply_id = ?1
       ORDER BY id",
      params![parent_id.get()],
      decode_reply,
    )
  }

  fn insert_reply(&self, new: NewReply) -> Result<Reply> {
    self.conn.execute(
      "INSERT INTO replies (question_id, parent_reply_id, author_id, body)
       VALUES (?1, ?2, ?3, ?4)",
      params![
        new.question_id.get(),
        new.parent_reply_id.map(ReplyId::get),
        new.author_id.get(),
        new.body,
      ],
    )?;
    let id = ReplyId(self.conn.last_insert_rowid());
    tracing::info!(table = "replies", %id, "inserted row");

    Ok(Reply {
      id,
      question_id: new.question_id,
      parent_reply_id: new.parent_reply_id,
      author_id: new.author_id,
      body: new.body,
    })
  }

  fn update_reply(&self, reply: &Reply) -> Result<()> {
    let changed = self.conn.execute(
      "UPDATE replies
       SET question_id = ?1, parent_reply_id = ?2, author_id = ?3, body = ?4
       WHERE id = ?5",
      params![
        reply.question_id.get(),
        reply.parent_reply_id.map(ReplyId::get),
        reply.author_id.get(),
        reply.body,
        reply.id.get(),
      ],
    )?;
    Self::check_updated("replies", reply.id.get(), changed)
  }

  // ── Likes ─────────────────────────────────────────────────────────────────

  fn all_likes(&self) -> Result<Vec<Like>> {
    tracing::debug!(table = "question_likes", "all");
    self.fetch_all(
      "SELECT id, user_id, question_id FROM question_likes ORDER BY id",
      [],
      decode_like,
    )
  }

  fn like_by_id(&self, id: LikeId) -> Result<Option<Like>> {
    tracing::debug!(table = "question_likes", %id, "find by id");
    self.fetch_one(
      "SELECT id, user_id, question_id FROM question_likes WHERE id = ?1",
      params![id.get()],
      decode_like,
    )
  }

  fn insert_like(&self, new: NewLike) -> Result<Like> {
    self.conn.execute(
      "INSERT INTO question_likes (user_id, question_id) VALUES (?1, ?2)",
      params![new.user_id.get(), new.question_id.get()],
    )?;
    let id = LikeId(self.conn.last_insert_rowid());
    tracing::info!(table = "question_likes", %id, "inserted row");

    Ok(Like { id, user_id: new.user_id, question_id: new.question_id })
  }

  fn update_like(&self, like: &Like) -> Result<()> {
    let changed = self.conn.execute(
      "UPDATE question_likes SET user_id = ?1, question_id = ?2 WHERE id = ?3",
      params![like.user_id.get(), like.question_id.get(), like.id.get()],
    )?;
    Self::check_updated("question_likes", like.id.get(), changed)
  }

  fn likers_for_question_id(&self, question_id: QuestionId) -> Result<Vec<User>> {
    tracing::debug!(table = "question_likes", %question_id, "likers");
    self.fetch_all(
      "SELECT u.id AS id, u.fname AS fname, u.lname AS lname
       FROM users u
       JOIN question_likes ql ON ql.user_id = u.id
       WHERE ql.question_id = ?1
       ORDER BY ql.id",
      params![question_id.get()],
      decode_user,
    )
  }

  fn num_likes_for_question_id(&self, question_id: QuestionId) -> Result<u64> {
    tracing::debug!(table = "question_likes", %question_id, "count");
    let count: i64 = self.conn.query_row(
      "SELECT COUNT(*) FROM question_likes WHERE question_id = ?1",
      params![question_id.get()],
      |row| row.get(0),
    )?;
    Ok(decode_count(count))
  }

  fn liked_questions_for_user_id(&self, user_id: UserId) -> Result<Vec<Question>> {
    tracing::debug!(table = "question_likes", %user_id, "liked questions");
    self.fetch_all(
      "SELECT q.id AS id, q.title AS title, q.body AS body,
              q.author_id AS author_id
       FROM questions q
       JOIN question_likes ql ON ql.question_id = q.id
       WHERE ql.user_id = ?1
       ORDER BY ql.id",
      params![user_id.get()],
      decode_question,
    )
  }

  fn most_liked_questions(&self, n: usize) -> Result<Vec<Question>> {
    tracing::debug!(table = "question_likes", n, "most liked");
    self.fetch_all(
      "SELECT q.id AS id, q.title AS title, q.body AS body,
              q.author_id AS author_id
       FROM questions q
       JOIN question_likes ql ON ql.question_id = q.id
       GROUP BY q.id
       ORDER BY COUNT(ql.id) DESC
       LIMIT ?1",
      params![encode_limit(n)],
      decode_question,
    )
  }
}
