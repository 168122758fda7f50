//! Question — a titled post by a user, the hub that replies, follows and
//! likes hang off.

use serde::{Deserialize, Serialize};

use crate::{
  id::{QuestionId, UserId},
  reply::Reply,
  store::QuestionStore,
  user::User,
};

/// A row of the `questions` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub id:        QuestionId,
  pub title:     String,
  pub body:      String,
  pub author_id: UserId,
}

/// Input to [`QuestionStore::insert_question`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
  pub title:     String,
  pub body:      String,
  pub author_id: UserId,
}

impl NewQuestion {
  pub fn new(
    title: impl Into<String>,
    body: impl Into<String>,
    author_id: UserId,
  ) -> Self {
    Self { title: title.into(), body: body.into(), author_id }
  }

  pub fn insert<S: QuestionStore>(
    self,
    store: &S,
  ) -> Result<Question, S::Error> {
    store.insert_question(self)
  }
}

impl Question {
  pub fn all<S: QuestionStore>(store: &S) -> Result<Vec<Self>, S::Error> {
    store.all_questions()
  }

  pub fn find_by_id<S: QuestionStore>(
    store: &S,
    id: QuestionId,
  ) -> Result<Option<Self>, S::Error> {
    store.question_by_id(id)
  }

  pub fn find_by_author_id<S: QuestionStore>(
    store: &S,
    author_id: UserId,
  ) -> Result<Vec<Self>, S::Error> {
    store.questions_by_author_id(author_id)
  }

  /// Up to `n` questions with the most followers, most followed first.
  pub fn most_followed<S: QuestionStore>(
    store: &S,
    n: usize,
  ) -> Result<Vec<Self>, S::Error> {
    store.most_followed_questions(n)
  }

  /// Up to `n` questions with the most likes, most liked first.
  pub fn most_liked<S: QuestionStore>(
    store: &S,
    n: usize,
  ) -> Result<Vec<Self>, S::Error> {
    store.most_liked_questions(n)
  }

  pub fn update<S: QuestionStore>(&self, store: &S) -> Result<(), S::Error> {
    store.update_question(self)
  }

  /// Re-fetches the author on every call. `None` if the author row is gone.
  pub fn author<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Option<User>, S::Error> {
    store.user_by_id(self.author_id)
  }

  pub fn replies<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Vec<Reply>, S::Error> {
    store.replies_by_question_id(self.id)
  }

  pub fn followers<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Vec<User>, S::Error> {
    store.followers_for_question_id(self.id)
  }

  pub fn likers<S: QuestionStore>(
    &self,
    store: &S,
  ) -> Result<Vec<User>, S::Error> {
    store.likers_for_question_id(self.id)
  }

  pub fn num_likes<S: QuestionStore>(&self, store: &S) -> Result<u64, S::Error> {
    store.num_likes_for_question_id(self.id)
  }
}
