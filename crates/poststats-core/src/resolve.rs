//! Latest-version resolution.
//!
//! Selects, for every entity, the single revision with the highest version.
//! Ties on the maximum version are broken by [`precedence`], a total order
//! over revision content, so the selection never depends on input order.

use std::{cmp::Ordering, collections::HashMap};

use crate::revision::{EntityId, Revision};

/// Order two revisions of the same entity; the greater one is newer.
///
/// Compares `version`, then `timestamp`, then the remaining content
/// (`topic`, `likes`, `shares`, `comments`). Two revisions that compare
/// `Equal` are indistinguishable to the aggregator.
pub fn precedence(a: &Revision, b: &Revision) -> Ordering {
  a.version
    .cmp(&b.version)
    .then_with(|| a.timestamp.cmp(&b.timestamp))
    .then_with(|| a.topic.cmp(&b.topic))
    .then_with(|| a.likes.cmp(&b.likes))
    .then_with(|| a.shares.cmp(&b.shares))
    .then_with(|| a.comments.cmp(&b.comments))
}

/// Return exactly one revision per distinct `entity_id`: the latest one.
///
/// Single pass over the input, keeping the best revision seen so far per
/// entity. The result is sorted by `entity_id`.
pub fn resolve_latest<I>(revisions: I) -> Vec<Revision>
where
  I: IntoIterator<Item = Revision>,
{
  let mut best: HashMap<EntityId, Revision> = HashMap::new();

  for revision in revisions {
    match best.get_mut(&revision.entity_id) {
      Some(current) => {
        if precedence(&revision, current) == Ordering::Greater {
          *current = revision;
        }
      }
      None => {
        best.insert(revision.entity_id, revision);
      }
    }
  }

  let mut latest: Vec<Revision> = best.into_values().collect();
  latest.sort_by_key(|r| r.entity_id);
  latest
}
