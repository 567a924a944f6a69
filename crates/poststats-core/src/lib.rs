//! Core types and the statistics engine for poststats.
//!
//! This crate is deliberately free of HTTP, CSV and database dependencies.
//! It turns an unordered collection of post revisions into a per-topic
//! report: resolve each entity to its latest revision, fold the survivors
//! into per-topic sums, then assemble an ordered report.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod aggregate;
pub mod error;
pub mod report;
pub mod resolve;
pub mod revision;
pub mod store;

pub use error::{Error, Result};

use report::TopicReport;
use revision::Revision;

/// Compute the per-topic report for a full set of revisions.
///
/// Equivalent to `assemble(aggregate(resolve_latest(revisions)))`. Pure: the
/// same input always yields the same report, whatever its order.
pub fn topic_statistics<I>(revisions: I) -> TopicReport
where
  I: IntoIterator<Item = Revision>,
{
  let latest = resolve::resolve_latest(revisions);
  let groups = aggregate::aggregate(&latest);
  report::assemble(groups)
}
