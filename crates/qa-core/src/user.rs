//! User — an author of questions and replies, and the actor behind follows
//! and likes.

use serde::{Deserialize, Serialize};

use crate::{
  id::UserId, question::Question, reply::Reply, store::QuestionStore,
};

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:    UserId,
  pub fname: String,
  pub lname: String,
}

/// Input to [`QuestionStore::insert_user`]. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
  pub fname: String,
  pub lname: String,
}

impl NewUser {
  pub fn new(fname: impl Into<String>, lname: impl Into<String>) -> Self {
    Self { fname: fname.into(), lname: lname.into() }
  }

  /// Persist this user and return it with its generated id.
  pub fn insert<S: QuestionStore>(self, store: &S) -> Result<User, S::Error> {
    store.insert_user(self)
  }
}

impl User {
  pub fn all<S: QuestionStore>(store: &S) -> Result<Vec<Self>, S::Error> {
    store.all_users()
  }

  pub fn find_by_id<S: QuestionStore>(
    store: &S,
    id: UserId,
  ) -> Result<Option<Self>, S::Error> {
    store.user_by_id(id)
  }

  pub fn find_by_name<S: QuestionStore>(
    store: &S,
    fname: &str,
    lname: &str,
  ) -> Result<Vec<Self>, S::Error> {
    store.users_by_name(fname, lname)
  }

  /// Rewrite every column of this user's row.
  pub fn update<S: QuestionStore>(&self, store: &S) -> Result<(), S::Error> {
    store.update_user(self)
  }

  pub fn authored_questions<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Vec<Question>, S::Error> {
    store.questions_by_author_id(self.id)
  }

  pub fn authored_replies<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Vec<Reply>, S::Error> {
    store.replies_by_author_id(self.id)
  }

  pub fn followed_questions<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Vec<Question>, S::Error> {
    store.followed_questions_for_user_id(self.id)
  }

  pub fn liked_questions<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Vec<Question>, S::Error> {
    store.liked_questions_for_user_id(self.id)
  }

  /// Average likes per authored question; `None` when the user has authored
  /// no questions (as opposed to `Some(0.0)` when nobody liked them).
  pub fn average_karma<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Option<f64>, S::Error> {
    store.average_karma(self.id)
  }
}
