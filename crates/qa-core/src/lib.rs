//! Core record types and the repository trait for the Q&A store.
//!
//! This crate is deliberately free of database dependencies. Records are
//! plain data; every query goes through a [`store::QuestionStore`] handle that
//! the caller constructs and passes in explicitly.

pub mod follow;
pub mod id;
pub mod like;
pub mod question;
pub mod reply;
pub mod store;
pub mod user;

pub use follow::{Follow, NewFollow};
pub use id::{FollowId, LikeId, QuestionId, ReplyId, UserId};
pub use like::{Like, NewLike};
pub use question::{NewQuestion, Question};
pub use reply::{NewReply, Reply};
pub use store::QuestionStore;
pub use user::{NewUser, User};
