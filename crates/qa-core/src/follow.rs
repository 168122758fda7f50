//! Follow — a user subscribing to a question (`question_follows` join table).

use serde::{Deserialize, Serialize};

use crate::{
  id::{FollowId, QuestionId, UserId},
  question::Question,
  store::QuestionStore,
  user::User,
};

/// A row of the `question_follows` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follow {
  pub id:          FollowId,
  pub user_id:     UserId,
  pub question_id: QuestionId,
}

/// Input to [`QuestionStore::insert_follow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFollow {
  pub user_id:     UserId,
  pub question_id: QuestionId,
}

impl NewFollow {
  pub fn new(user_id: UserId, question_id: QuestionId) -> Self {
    Self { user_id, question_id }
  }

  pub fn insert<S: QuestionStore>(self, store: &S) -> Result<Follow, S::Error> {
    store.insert_follow(self)
  }
}

impl Follow {
  pub fn all<S: QuestionStore>(store: &S) -> Result<Vec<Self>, S::Error> {
    store.all_follows()
  }

  pub fn find_by_id<S: QuestionStore>(
    store: &S,
    id: FollowId,
  ) -> Result<Option<Self>, S::Error> {
    store.follow_by_id(id)
  }

  pub fn followers_for_question_id<S: QuestionStore>(
    store: &S,
    question_id: QuestionId,
  ) -> Result<Vec<User>, S::Error> {
    store.followers_for_question_id(question_id)
  }

  pub fn followed_questions_for_user_id<S: QuestionStore>(
    store: &S,
    user_id: UserId,
  ) -> Result<Vec<Question>, S::Error> {
    store.followed_questions_for_user_id(user_id)
  }

  pub fn most_followed_questions<S: QuestionStore>(
    store: &S,
    n: usize,
  ) -> Result<Vec<Question>, S::Error> {
    store.most_followed_questions(n)
  }

  pub fn update<S: QuestionStore>(&self, store: &S) -> Result<(), S::Error> {
    store.update_follow(self)
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
