//! Like — a user endorsing a question (`question_likes` join table).
//!
//! Same shape as [`crate::follow::Follow`]; the two tables are counted
//! separately for ranking and karma.

use serde::{Deserialize, Serialize};

use crate::{
  id::{LikeId, QuestionId, UserId},
  question::Question,
  store::QuestionStore,
  user::User,
};

/// A row of the `question_likes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
  pub id:          LikeId,
  pub user_id:     UserId,
  pub question_id: QuestionId,
}

/// Input to [`QuestionStore::insert_like`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLike {
  pub user_id:     UserId,
  pub question_id: QuestionId,
}

impl NewLike {
  pub fn new(user_id: UserId, question_id: QuestionId) -> Self {
    Self { user_id, question_id }
  }

  pub fn insert<S: QuestionStore>(self, store: &S) -> Result<Like, S::Error> {
    store.insert_like(self)
  }
}

impl Like {
  pub fn all<S: QuestionStore>(store: &S) -> Result<Vec<Self>, S::Error> {
    store.all_likes()
  }

  pub fn find_by_id<S: QuestionStore>(
    store: &S,
    id: LikeId,
  ) -> Result<Option<Self>, S::Error> {
    store.like_by_id(id)
  }

  pub fn likers_for_question_id<S: QuestionStore>(
    store: &S,
    question_id: QuestionId,
  ) -> Result<Vec<User>, S::Error> {
    store.likers_for_question_id(question_id)
  }

  pub fn num_likes_for_question_id<S: QuestionStore>(
    store: &S,
    question_id: QuestionId,
  ) -> Result<u64, S::Error> {
    store.num_likes_for_question_id(question_id)
  }

  pub fn liked_questions_for_user_id<S: QuestionStore>(
    store: &S,
    user_id: UserId,
  ) -> Result<Vec<Question>, S::Error> {
    store.liked_questions_for_user_id(user_id)
  }

  pub fn most_liked_questions<S: QuestionStore>(
    store: &S,
    n: usize,
  ) -> Result<Vec<Question>, S::Error> {
    store.most_liked_questions(n)
  }

  pub fn update<S: QuestionStore>(&self, store: &S) -> Result<(), S::Error> {
    store.update_like(self)
  }

  pub fn user<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Option<User>, S::Error> {
    store.user_by_id(self.user_id)
  }

  pub fn question<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Option<Question>, S::Error> {
    store.question_by_id(self.question_id)
  }
}
