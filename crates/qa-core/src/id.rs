//! Typed row identifiers.
//!
//! Every table uses a store-assigned integer primary key. Wrapping each one in
//! its own newtype keeps a `UserId` from being passed where a `QuestionId` is
//! expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! record_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
      Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl $name {
      /// The raw integer key as stored in the database.
      pub const fn get(self) -> i64 { self.0 }
    }

    impl From<i64> for $name {
      fn from(raw: i64) -> Self { Self(raw) }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
      }
    }
  };
}

record_id!(
  /// Primary key of the `users` table.
  UserId
);
record_id!(
  /// Primary key of the `questions` table.
  QuestionId
);
record_id!(
  /// Primary key of the `question_follows` table.
  FollowId
);
record_id!(
  /// Primary key of the `replies` table.
  ReplyId
);
record_id!(
  /// Primary key of the `question_likes` table.
  LikeId
);
