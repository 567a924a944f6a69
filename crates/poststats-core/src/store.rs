//! The `RevisionStore` trait and the composed statistics query.
//!
//! The trait is implemented by storage backends (e.g.
//! `poststats-store-sqlite`). Higher layers (`poststats-api`,
//! `poststats-server`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{report::TopicReport, revision::Revision, topic_statistics};

/// Row and cardinality counts for the current revision set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
  pub revisions: u64,
  pub entities:  u64,
  pub topics:    u64,
}

/// Abstraction over a revision store backend.
///
/// Readers must always observe a consistent revision set: a concurrent
/// [`replace_all`](RevisionStore::replace_all) is either fully visible or not
/// visible at all.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RevisionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every stored revision of every entity, in no particular order.
  fn all_revisions(
    &self,
  ) -> impl Future<Output = Result<Vec<Revision>, Self::Error>> + Send + '_;

  /// Atomically replace the whole revision set with `revisions`.
  ///
  /// Returns the number of revisions written.
  fn replace_all(
    &self,
    revisions: Vec<Revision>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Count revisions, distinct entities and distinct topics.
  fn summary(
    &self,
  ) -> impl Future<Output = Result<StoreSummary, Self::Error>> + Send + '_;
}

/// Read the store's current revisions and compute the topic report.
///
/// Each call is a fresh, full pass; nothing is cached between calls.
pub async fn collect_statistics<S>(store: &S) -> Result<TopicReport, S::Error>
where
  S: RevisionStore + ?Sized,
{
  let revisions = store.all_revisions().await?;
  Ok(topic_statistics(revisions))
}
