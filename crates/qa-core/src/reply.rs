//! Reply — an answer to a question, optionally nested under another reply.
//!
//! Replies under one question form a forest: roots have no parent, and each
//! child points at its parent through `parent_reply_id`.

use serde::{Deserialize, Serialize};

use crate::{
  id::{QuestionId, ReplyId, UserId},
  question::Question,
  store::QuestionStore,
  user::User,
};

/// A row of the `replies` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
  pub id:              ReplyId,
  pub question_id:     QuestionId,
  /// `None` for a top-level reply.
  pub parent_reply_id: Option<ReplyId>,
  pub author_id:       UserId,
  pub body:            String,
}

/// Input to [`QuestionStore::insert_reply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReply {
  pub question_id:     QuestionId,
  pub parent_reply_id: Option<ReplyId>,
  pub author_id:       UserId,
  pub body:            String,
}

impl NewReply {
  /// A top-level reply to `question_id`.
  pub fn root(
    question_id: QuestionId,
    author_id: UserId,
    body: impl Into<String>,
  ) -> Self {
    Self { question_id, parent_reply_id: None, author_id, body: body.into() }
  }

  /// A reply nested under `parent`, on the same question.
  pub fn child_of(
    parent: &Reply,
    author_id: UserId,
    body: impl Into<String>,
  ) -> Self {
    Self {
      question_id: parent.question_id,
      parent_reply_id: Some(parent.id),
      author_id,
      body: body.into(),
    }
  }

  pub fn insert<S: QuestionStore>(self, store: &S) -> Result<Reply, S::Error> {
    store.insert_reply(self)
  }
}

impl Reply {
  pub fn all<S: QuestionStore>(store: &S) -> Result<Vec<Self>, S::Error> {
    store.all_replies()
  }

  pub fn find_by_id<S: QuestionStore>(
    store: &S,
    id: ReplyId,
  ) -> Result<Option<Self>, S::Error> {
    store.reply_by_id(id)
  }

  /// Replies written by `author_id`.
  pub fn find_by_user_id<S: QuestionStore>(
    store: &S,
    author_id: UserId,
  ) -> Result<Vec<Self>, S::Error> {
    store.replies_by_author_id(author_id)
  }

  pub fn find_by_question_id<S: QuestionStore>(
    store: &S,
    question_id: QuestionId,
  ) -> Result<Vec<Self>, S::Error> {
    store.replies_by_question_id(question_id)
  }

  pub fn is_root(&self) -> bool { self.parent_reply_id.is_none() }

  pub fn update<S: QuestionStore>(&self, store: &S) -> Result<(), S::Error> {
    store.update_reply(self)
  }

  pub fn author<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Option<User>, S::Error> {
    store.user_by_id(self.author_id)
  }

  pub fn question<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Option<Question>, S::Error> {
    store.question_by_id(self.question_id)
  }

  /// The reply this one is nested under. Root replies return `None` without
  /// touching the store.
  pub fn parent_reply<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Option<Reply>, S::Error> {
    match self.parent_reply_id {
      Some(parent_id) => store.reply_by_id(parent_id),
      None => Ok(None),
    }
  }

  /// Direct children only.
  pub fn child_replies<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Vec<Reply>, S::Error> {
    store.child_replies(self.id)
  }
}
