//! The `QuestionStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `qa-store-sqlite`).
//! Record types call into it from their finders and relationship accessors, so
//! callers never hold a global connection: the handle is always passed in.
//!
//! Single lookups return `Option`; multi lookups return a possibly empty
//! `Vec`. A missing row is never an error.

use crate::{
  follow::{Follow, NewFollow},
  id::{FollowId, LikeId, QuestionId, ReplyId, UserId},
  like::{Like, NewLike},
  question::{NewQuestion, Question},
  reply::{NewReply, Reply},
  user::{NewUser, User},
};

/// Abstraction over a Q&A store backend.
///
/// Every method is a single blocking round-trip that returns fully
/// materialised results. Inserts return the persisted record carrying its
/// store-generated id; updates rewrite every mapped column keyed by id.
pub trait QuestionStore {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  fn all_users(&self) -> Result<Vec<User>, Self::Error>;

  fn user_by_id(&self, id: UserId) -> Result<Option<User>, Self::Error>;

  /// All users with exactly this first and last name.
  fn users_by_name(
    &self,
    fname: &str,
    lname: &str,
  ) -> Result<Vec<User>, Self::Error>;

  fn insert_user(&self, new: NewUser) -> Result<User, Self::Error>;

  fn update_user(&self, user: &User) -> Result<(), Self::Error>;

  /// Mean like count over the questions authored by `user_id`, counting
  /// unliked questions as zero. `None` if the user has authored nothing.
  fn average_karma(&self, user_id: UserId) -> Result<Option<f64>, Self::Error>;

  // ── Questions ─────────────────────────────────────────────────────────

  fn all_questions(&self) -> Result<Vec<Question>, Self::Error>;

  fn question_by_id(
    &self,
    id: QuestionId,
  ) -> Result<Option<Question>, Self::Error>;

  fn questions_by_author_id(
    &self,
    author_id: UserId,
  ) -> Result<Vec<Question>, Self::Error>;

  fn insert_question(&self, new: NewQuestion) -> Result<Question, Self::Error>;

  fn update_question(&self, question: &Question) -> Result<(), Self::Error>;

  // ── Follows ───────────────────────────────────────────────────────────

  fn all_follows(&self) -> Result<Vec<Follow>, Self::Error>;

  fn follow_by_id(&self, id: FollowId) -> Result<Option<Follow>, Self::Error>;

  fn insert_follow(&self, new: NewFollow) -> Result<Follow, Self::Error>;

  fn update_follow(&self, follow: &Follow) -> Result<(), Self::Error>;

  fn followers_for_question_id(
    &self,
    question_id: QuestionId,
  ) -> Result<Vec<User>, Self::Error>;

  fn followed_questions_for_user_id(
    &self,
    user_id: UserId,
  ) -> Result<Vec<Question>, Self::Error>;

  /// Up to `n` questions ordered by descending follower count. Tie order is
  /// whatever the store yields and must not be relied on.
  fn most_followed_questions(
    &self,
    n: usize,
  ) -> Result<Vec<Question>, Self::Error>;

  // ── Replies ───────────────────────────────────────────────────────────

  fn all_replies(&self) -> Result<Vec<Reply>, Self::Error>;

  fn reply_by_id(&self, id: ReplyId) -> Result<Option<Reply>, Self::Error>;

  fn replies_by_author_id(
    &self,
    author_id: UserId,
  ) -> Result<Vec<Reply>, Self::Error>;

  fn replies_by_question_id(
    &self,
    question_id: QuestionId,
  ) -> Result<Vec<Reply>, Self::Error>;

  /// Direct children of `parent_id` only; grandchildren are not included.
  fn child_replies(&self, parent_id: ReplyId)
  -> Result<Vec<Reply>, Self::Error>;

  fn insert_reply(&self, new: NewReply) -> Result<Reply, Self::Error>;

  fn update_reply(&self, reply: &Reply) -> Result<(), Self::Error>;

  // ── Likes ─────────────────────────────────────────────────────────────

  fn all_likes(&self) -> Result<Vec<Like>, Self::Error>;

  fn like_by_id(&self, id: LikeId) -> Result<Option<Like>, Self::Error>;

  fn insert_like(&self, new: NewLike) -> Result<Like, Self::Error>;

  fn update_like(&self, like: &Like) -> Result<(), Self::Error>;

  fn likers_for_question_id(
    &self,
    question_id: QuestionId,
  ) -> Result<Vec<User>, Self::Error>;

  fn num_likes_for_question_id(
    &self,
    question_id: QuestionId,
  ) -> Result<u64, Self::Error>;

  fn liked_questions_for_user_id(
    &self,
    user_id: UserId,
  ) -> Result<Vec<Question>, Self::Error>;

  /// Up to `n` questions ordered by descending like count. Tie order is
  /// whatever the store yields and must not be relied on.
  fn most_liked_questions(&self, n: usize)
  -> Result<Vec<Question>, Self::Error>;
}
