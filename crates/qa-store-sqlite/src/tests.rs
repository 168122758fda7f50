//! Integration tests for `SqliteStore` against an in-memory database.

use qa_core::{
  Follow, FollowId, Like, LikeId, NewFollow, NewLike, NewQuestion, NewReply,
  NewUser, Question, QuestionId, QuestionStore, Reply, ReplyId, User, UserId,
};

use crate::{Error, SqliteStore, StoreConfig};

fn store() -> SqliteStore {
  SqliteStore::open_in_memory().expect("in-memory store")
}

fn user(s: &SqliteStore, fname: &str, lname: &str) -> User {
  NewUser::new(fname, lname).insert(s).unwrap()
}

fn question(s: &SqliteStore, title: &str, author: &User) -> Question {
  NewQuestion::new(title, format!("{title} body"), author.id)
    .insert(s)
    .unwrap()
}

fn like(s: &SqliteStore, who: &User, what: &Question) -> Like {
  NewLike::new(who.id, what.id).insert(s).unwrap()
}

fn follow(s: &SqliteStore, who: &User, what: &Question) -> Follow {
  NewFollow::new(who.id, what.id).insert(s).unwrap()
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[test]
fn insert_user_assigns_id_and_find_by_id_returns_it() {
  let s = store();

  let ada = NewUser::new("Ada", "Lovelace").insert(&s).unwrap();
  assert_eq!(ada.id, UserId(1));

  let fetched = User::find_by_id(&s, UserId(1)).unwrap().unwrap();
  assert_eq!(fetched.fname, "Ada");
  assert_eq!(fetched.lname, "Lovelace");
  assert_eq!(fetched, ada);
}

#[test]
fn find_by_id_missing_returns_none() {
  let s = store();
  assert!(User::find_by_id(&s, UserId(99)).unwrap().is_none());
  assert!(Question::find_by_id(&s, QuestionId(99)).unwrap().is_none());
  assert!(Follow::find_by_id(&s, FollowId(99)).unwrap().is_none());
  assert!(Reply::find_by_id(&s, ReplyId(99)).unwrap().is_none());
  assert!(Like::find_by_id(&s, LikeId(99)).unwrap().is_none());
}

#[test]
fn all_on_empty_store_is_empty() {
  let s = store();
  assert!(User::all(&s).unwrap().is_empty());
  assert!(Question::all(&s).unwrap().is_empty());
  assert!(Follow::all(&s).unwrap().is_empty());
  assert!(Reply::all(&s).unwrap().is_empty());
  assert!(Like::all(&s).unwrap().is_empty());
}

#[test]
fn all_users_returns_every_row() {
  let s = store();
  let a = user(&s, "Ada", "Lovelace");
  let b = user(&s, "Alan", "Turing");

  assert_eq!(User::all(&s).unwrap(), vec![a, b]);
}

#[test]
fn update_user_rewrites_fields() {
  let s = store();
  let mut ada = user(&s, "Ada", "Byron");

  ada.lname = "Lovelace".into();
  ada.update(&s).unwrap();

  let fetched = User::find_by_id(&s, ada.id).unwrap().unwrap();
  assert_eq!(fetched.lname, "Lovelace");
  assert_eq!(User::all(&s).unwrap().len(), 1);
}

#[test]
fn update_unknown_user_errors() {
  let s = store();
  let ghost = User { id: UserId(42), fname: "No".into(), lname: "One".into() };

  let err = ghost.update(&s).unwrap_err();
  assert!(matches!(
    err,
    Error::RecordNotFound { table: "users", id: 42 }
  ));
}

#[test]
fn find_by_name_matches_both_parts() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  user(&s, "Ada", "Yonath");

  assert_eq!(User::find_by_name(&s, "Ada", "Lovelace").unwrap(), vec![ada]);
  assert!(User::find_by_name(&s, "Grace", "Hopper").unwrap().is_empty());
}

#[test]
fn user_relationship_accessors() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let alan = user(&s, "Alan", "Turing");

  let q1 = question(&s, "Q1", &ada);
  let q2 = question(&s, "Q2", &alan);
  let r = NewReply::root(q2.id, ada.id, "answer").insert(&s).unwrap();
  follow(&s, &ada, &q2);
  like(&s, &ada, &q2);

  assert_eq!(ada.authored_questions(&s).unwrap(), vec![q1]);
  assert_eq!(ada.authored_replies(&s).unwrap(), vec![r]);
  assert_eq!(ada.followed_questions(&s).unwrap(), vec![q2.clone()]);
  assert_eq!(ada.liked_questions(&s).unwrap(), vec![q2]);

  assert!(alan.authored_replies(&s).unwrap().is_empty());
  assert!(alan.followed_questions(&s).unwrap().is_empty());
}

// ─── Karma ───────────────────────────────────────────────────────────────────

#[test]
fn average_karma_without_questions_is_none() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  assert_eq!(ada.average_karma(&s).unwrap(), None);
}

#[test]
fn average_karma_with_unliked_questions_is_zero() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  question(&s, "Q1", &ada);
  assert_eq!(ada.average_karma(&s).unwrap(), Some(0.0));
}

#[test]
fn average_karma_counts_unliked_questions() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let fans: Vec<User> =
    (0..3).map(|i| user(&s, &format!("Fan{i}"), "X")).collect();

  let q1 = question(&s, "Q1", &ada);
  question(&s, "Q2", &ada);
  for fan in &fans {
    like(&s, fan, &q1);
  }

  // (3 + 0) / 2
  assert_eq!(ada.average_karma(&s).unwrap(), Some(1.5));
}

// ─── Questions ───────────────────────────────────────────────────────────────

#[test]
fn insert_question_and_find_by_author() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let alan = user(&s, "Alan", "Turing");
  let q1 = question(&s, "Q1", &ada);
  let q2 = question(&s, "Q2", &ada);
  question(&s, "Q3", &alan);

  assert_eq!(Question::find_by_id(&s, q1.id).unwrap(), Some(q1.clone()));
  assert_eq!(Question::find_by_author_id(&s, ada.id).unwrap(), vec![q1, q2]);
  assert!(Question::find_by_author_id(&s, UserId(77)).unwrap().is_empty());
}

#[test]
fn update_question_rewrites_fields() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let alan = user(&s, "Alan", "Turing");
  let mut q = question(&s, "Q1", &ada);

  q.title = "Q1 (edited)".into();
  q.author_id = alan.id;
  q.update(&s).unwrap();

  let fetched = Question::find_by_id(&s, q.id).unwrap().unwrap();
  assert_eq!(fetched, q);
  assert_eq!(fetched.author(&s).unwrap(), Some(alan));
}

#[test]
fn question_author_tolerates_dangling_reference() {
  let s = store();
  let q = NewQuestion::new("Orphan", "B", UserId(500)).insert(&s).unwrap();
  assert_eq!(q.author(&s).unwrap(), None);
}

#[test]
fn question_relationship_accessors() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let alan = user(&s, "Alan", "Turing");
  let q = question(&s, "Q1", &ada);

  let r = NewReply::root(q.id, alan.id, "hi").insert(&s).unwrap();
  follow(&s, &alan, &q);
  like(&s, &alan, &q);
  like(&s, &ada, &q);

  assert_eq!(q.author(&s).unwrap(), Some(ada.clone()));
  assert_eq!(q.replies(&s).unwrap(), vec![r]);
  assert_eq!(q.followers(&s).unwrap(), vec![alan.clone()]);
  assert_eq!(q.likers(&s).unwrap(), vec![alan, ada]);
  assert_eq!(q.num_likes(&s).unwrap(), 2);
}

#[test]
fn num_likes_counts_two_users() {
  let s = store();
  let author = user(&s, "Ada", "Lovelace");
  let q = NewQuestion::new("Q1", "B1", author.id).insert(&s).unwrap();
  let u2 = user(&s, "Alan", "Turing");
  let u3 = user(&s, "Grace", "Hopper");
  like(&s, &u2, &q);
  like(&s, &u3, &q);

  assert_eq!(Like::num_likes_for_question_id(&s, q.id).unwrap(), 2);
  assert_eq!(Like::num_likes_for_question_id(&s, QuestionId(9)).unwrap(), 0);
}

// ─── Rankings ────────────────────────────────────────────────────────────────

/// Three questions liked 3, 1 and 2 times respectively, plus one unliked.
fn ranked_fixture(s: &SqliteStore) -> (Question, Question, Question, Question) {
  let author = user(s, "Ada", "Lovelace");
  let fans: Vec<User> =
    (0..3).map(|i| user(s, &format!("Fan{i}"), "X")).collect();

  let gold = question(s, "gold", &author);
  let bronze = question(s, "bronze", &author);
  let silver = question(s, "silver", &author);
  let unloved = question(s, "unloved", &author);

  for fan in &fans {
    like(s, fan, &gold);
    follow(s, fan, &gold);
  }
  like(s, &fans[0], &bronze);
  follow(s, &fans[0], &bronze);
  for fan in &fans[..2] {
    like(s, fan, &silver);
    follow(s, fan, &silver);
  }

  (gold, silver, bronze, unloved)
}

#[test]
fn most_liked_orders_by_like_count() {
  let s = store();
  let (gold, silver, bronze, _) = ranked_fixture(&s);

  assert_eq!(Question::most_liked(&s, 3).unwrap(), vec![
    gold.clone(),
    silver.clone(),
    bronze
  ]);
  assert_eq!(Question::most_liked(&s, 2).unwrap(), vec![gold, silver]);
}

#[test]
fn most_liked_is_bounded_and_non_increasing() {
  let s = store();
  ranked_fixture(&s);

  for n in 0..6 {
    let top = Like::most_liked_questions(&s, n).unwrap();
    assert!(top.len() <= n);
    let counts: Vec<u64> =
      top.iter().map(|q| q.num_likes(&s).unwrap()).collect();
    assert!(counts.windows(2).all(|w| w[0] >= w[1]), "{counts:?}");
  }
}

#[test]
fn most_liked_zero_is_empty() {
  let s = store();
  ranked_fixture(&s);
  assert!(Question::most_liked(&s, 0).unwrap().is_empty());
}

#[test]
fn most_followed_orders_by_follow_count() {
  let s = store();
  let (gold, silver, bronze, _) = ranked_fixture(&s);

  assert_eq!(Follow::most_followed_questions(&s, 10).unwrap(), vec![
    gold.clone(),
    silver,
    bronze
  ]);
  assert_eq!(Question::most_followed(&s, 1).unwrap(), vec![gold]);
}

// ─── Follows ─────────────────────────────────────────────────────────────────

#[test]
fn follow_lookups() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let alan = user(&s, "Alan", "Turing");
  let q1 = question(&s, "Q1", &ada);
  let q2 = question(&s, "Q2", &ada);

  let f = follow(&s, &alan, &q1);
  follow(&s, &alan, &q2);
  follow(&s, &ada, &q1);

  assert_eq!(Follow::find_by_id(&s, f.id).unwrap(), Some(f.clone()));
  assert_eq!(Follow::all(&s).unwrap().len(), 3);
  assert_eq!(Follow::followers_for_question_id(&s, q1.id).unwrap(), vec![
    alan.clone(),
    ada
  ]);
  assert_eq!(
    Follow::followed_questions_for_user_id(&s, alan.id).unwrap(),
    vec![q1.clone(), q2]
  );
  assert_eq!(f.user(&s).unwrap(), Some(alan));
  assert_eq!(f.question(&s).unwrap(), Some(q1));
}

#[test]
fn duplicate_follow_is_rejected_by_schema() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let q = question(&s, "Q1", &ada);
  follow(&s, &ada, &q);

  let err = NewFollow::new(ada.id, q.id).insert(&s).unwrap_err();
  assert!(matches!(err, Error::Database(_)));
}

#[test]
fn update_follow_moves_it() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let q1 = question(&s, "Q1", &ada);
  let q2 = question(&s, "Q2", &ada);
  let mut f = follow(&s, &ada, &q1);

  f.question_id = q2.id;
  f.update(&s).unwrap();

  assert_eq!(Follow::find_by_id(&s, f.id).unwrap(), Some(f));
  assert!(q1.followers(&s).unwrap().is_empty());
  assert_eq!(q2.followers(&s).unwrap(), vec![ada]);
}

// ─── Replies ─────────────────────────────────────────────────────────────────

#[test]
fn child_replies_returns_direct_children() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let q = question(&s, "Q1", &ada);

  let root = NewReply::root(q.id, ada.id, "root").insert(&s).unwrap();
  let child = NewReply {
    question_id:     q.id,
    parent_reply_id: Some(root.id),
    author_id:       ada.id,
    body:            "child".into(),
  }
  .insert(&s)
  .unwrap();

  assert!(root.is_root());
  assert_eq!(root.child_replies(&s).unwrap(), vec![child.clone()]);
  assert!(child.child_replies(&s).unwrap().is_empty());
}

#[test]
fn child_replies_excludes_grandchildren() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let q = question(&s, "Q1", &ada);

  let root = NewReply::root(q.id, ada.id, "root").insert(&s).unwrap();
  let child = NewReply::child_of(&root, ada.id, "child").insert(&s).unwrap();
  let grandchild =
    NewReply::child_of(&child, ada.id, "grandchild").insert(&s).unwrap();

  assert_eq!(root.child_replies(&s).unwrap(), vec![child.clone()]);
  assert_eq!(child.child_replies(&s).unwrap(), vec![grandchild.clone()]);
  assert_eq!(grandchild.question_id, q.id);
}

#[test]
fn reply_navigation() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let alan = user(&s, "Alan", "Turing");
  let q = question(&s, "Q1", &ada);

  let root = NewReply::root(q.id, alan.id, "root").insert(&s).unwrap();
  let child = NewReply::child_of(&root, ada.id, "child").insert(&s).unwrap();

  assert_eq!(root.parent_reply(&s).unwrap(), None);
  assert_eq!(child.parent_reply(&s).unwrap(), Some(root.clone()));
  assert_eq!(child.author(&s).unwrap(), Some(ada.clone()));
  assert_eq!(child.question(&s).unwrap(), Some(q.clone()));

  assert_eq!(Reply::find_by_user_id(&s, alan.id).unwrap(), vec![root.clone()]);
  assert_eq!(Reply::find_by_question_id(&s, q.id).unwrap(), vec![
    root, child
  ]);
  assert!(Reply::find_by_question_id(&s, QuestionId(8)).unwrap().is_empty());
}

#[test]
fn update_reply_rewrites_fields() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let q = question(&s, "Q1", &ada);
  let root = NewReply::root(q.id, ada.id, "root").insert(&s).unwrap();
  let mut other = NewReply::root(q.id, ada.id, "other").insert(&s).unwrap();

  other.body = "now nested".into();
  other.parent_reply_id = Some(root.id);
  other.update(&s).unwrap();

  assert_eq!(Reply::find_by_id(&s, other.id).unwrap(), Some(other.clone()));
  assert_eq!(root.child_replies(&s).unwrap(), vec![other]);
}

// ─── Likes ───────────────────────────────────────────────────────────────────

#[test]
fn like_lookups() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let alan = user(&s, "Alan", "Turing");
  let q1 = question(&s, "Q1", &ada);
  let q2 = question(&s, "Q2", &ada);

  let l = like(&s, &alan, &q1);
  like(&s, &alan, &q2);

  assert_eq!(Like::find_by_id(&s, l.id).unwrap(), Some(l.clone()));
  assert_eq!(Like::likers_for_question_id(&s, q1.id).unwrap(), vec![
    alan.clone()
  ]);
  assert_eq!(Like::liked_questions_for_user_id(&s, alan.id).unwrap(), vec![
    q1.clone(),
    q2
  ]);
  assert!(Like::liked_questions_for_user_id(&s, ada.id).unwrap().is_empty());
  assert_eq!(l.user(&s).unwrap(), Some(alan));
  assert_eq!(l.question(&s).unwrap(), Some(q1));
}

#[test]
fn update_like_and_unknown_like() {
  let s = store();
  let ada = user(&s, "Ada", "Lovelace");
  let alan = user(&s, "Alan", "Turing");
  let q = question(&s, "Q1", &ada);
  let mut l = like(&s, &ada, &q);

  l.user_id = alan.id;
  l.update(&s).unwrap();
  assert_eq!(q.likers(&s).unwrap(), vec![alan]);

  let ghost = Like { id: LikeId(404), user_id: ada.id, question_id: q.id };
  assert!(matches!(
    ghost.update(&s).unwrap_err(),
    Error::RecordNotFound { table: "question_likes", id: 404 }
  ));
}

// ─── Configuration ───────────────────────────────────────────────────────────

#[test]
fn from_config_in_memory_tolerates_dangling_keys() {
  let s = SqliteStore::from_config(&StoreConfig::in_memory()).unwrap();
  let q = NewQuestion::new("Q", "B", UserId(1)).insert(&s).unwrap();
  assert_eq!(q.id, QuestionId(1));
}

#[test]
fn from_config_can_enforce_foreign_keys() {
  let cfg = StoreConfig { enforce_foreign_keys: true, ..StoreConfig::in_memory() };
  let s = SqliteStore::from_config(&cfg).unwrap();

  let err = NewQuestion::new("Q", "B", UserId(1)).insert(&s).unwrap_err();
  assert!(matches!(err, Error::Database(_)));

  let ada = user(&s, "Ada", "Lovelace");
  assert!(NewQuestion::new("Q", "B", ada.id).insert(&s).is_ok());
}

#[test]
fn from_config_without_schema_has_no_tables() {
  let cfg = StoreConfig { init_schema: false, ..StoreConfig::in_memory() };
  let s = SqliteStore::from_config(&cfg).unwrap();
  assert!(matches!(s.all_users().unwrap_err(), Error::Database(_)));
}

#[test]
fn file_store_persists_across_handles() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("questions.db");

  let ada = {
    let s = SqliteStore::open(&path).unwrap();
    user(&s, "Ada", "Lovelace")
  };

  let cfg = StoreConfig { path: path.clone(), ..StoreConfig::default() };
  let s = SqliteStore::from_config(&cfg).unwrap();
  assert_eq!(User::find_by_id(&s, ada.id).unwrap(), Some(ada));
}

#[test]
fn schema_version_is_recorded() {
  let s = store();
  let version: i64 = s
    .connection()
    .query_row("PRAGMA user_version", [], |row| row.get(0))
    .unwrap();
  assert_eq!(version, 1);
}
