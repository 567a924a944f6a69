//! Per-topic aggregation over resolved revisions.
//!
//! Every revision counts towards its topic's `posts_count`. Counter values
//! are summed only when strictly positive: the `-1` sentinel and any other
//! non-positive value contribute nothing, so a total of `0` can mean either
//! "nothing measured" or "measured zero".
//!
//! Sums are kept as `u128`. Each counter is at most `i64::MAX`, so no number
//! of posts representable in memory can overflow a total.

use std::collections::BTreeMap;

use crate::revision::{Revision, measured};

/// Running totals for one topic during a single aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicAccumulator {
  pub posts_count:    u64,
  pub total_likes:    u128,
  pub total_shares:   u128,
  pub total_comments: u128,
}

impl TopicAccumulator {
  /// Fold one revision into the totals.
  pub fn observe(&mut self, revision: &Revision) {
    self.posts_count += 1;
    self.total_likes += positive(revision.likes);
    self.total_shares += positive(revision.shares);
    self.total_comments += positive(revision.comments);
  }
}

fn positive(value: i64) -> u128 { measured(value).map_or(0, u128::from) }

/// Group `latest` by topic. Accumulators are created on first encounter.
pub fn aggregate<'a, I>(latest: I) -> BTreeMap<String, TopicAccumulator>
where
  I: IntoIterator<Item = &'a Revision>,
{
  let mut groups: BTreeMap<String, TopicAccumulator> = BTreeMap::new();
  for revision in latest {
    groups
      .entry(revision.topic.clone())
      .or_default()
      .observe(revision);
  }
  groups
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{revision::MISSING, test_helpers::rev};

  #[test]
  fn empty_input_has_no_groups() {
    assert!(aggregate(&[] as &[Revision]).is_empty());
  }

  #[test]
  fn counts_every_revision_even_all_sentinel() {
    let latest = vec![
      rev(1, 1, "sports", MISSING, MISSING, MISSING),
      rev(2, 1, "sports", 0, 0, 0),
    ];
    let groups = aggregate(&latest);
    assert_eq!(
      groups["sports"],
      TopicAccumulator { posts_count: 2, ..Default::default() }
    );
  }

  #[test]
  fn sums_only_positive_counters() {
    let latest = vec![
      rev(1, 1, "news", 4, -1, 9),
      rev(2, 1, "news", -1, 6, 0),
      rev(3, 1, "news", 10, 2, -5),
    ];
    let groups = aggregate(&latest);
    let news = groups["news"];
    assert_eq!(news.posts_count, 3);
    assert_eq!(news.total_likes, 14);
    assert_eq!(news.total_shares, 8);
    assert_eq!(news.total_comments, 9);
  }

  #[test]
  fn groups_by_topic() {
    let latest = vec![
      rev(1, 1, "tech", 1, 0, 0),
      rev(2, 1, "health", 2, 0, 0),
      rev(3, 1, "tech", 3, 0, 0),
    ];
    let groups = aggregate(&latest);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups["tech"].posts_count, 2);
    assert_eq!(groups["tech"].total_likes, 4);
    assert_eq!(groups["health"].posts_count, 1);
  }

  #[test]
  fn maximal_counters_do_not_overflow() {
    let latest = vec![
      rev(1, 1, "tech", i64::MAX, i64::MAX, 1),
      rev(2, 1, "tech", i64::MAX, i64::MAX, 1),
      rev(3, 1, "tech", i64::MAX, 0, i64::MAX),
    ];
    let tech = aggregate(&latest)["tech"];
    let max = i64::MAX as u128;
    assert_eq!(tech.posts_count, 3);
    assert_eq!(tech.total_likes, 3 * max);
    assert_eq!(tech.total_shares, 2 * max);
    assert_eq!(tech.total_comments, max + 2);
    assert!(tech.total_likes > u128::from(u64::MAX));
  }

  #[test]
  fn groups_sort_bytewise_by_topic() {
    let latest = vec![
      rev(1, 1, "news", 1, 0, 0),
      rev(2, 1, "évènements", 1, 0, 0),
      rev(3, 1, "Tech", 1, 0, 0),
      rev(4, 1, "tech", 1, 0, 0),
    ];
    let topics: Vec<_> = aggregate(&latest).into_keys().collect();
    assert_eq!(topics, ["Tech", "news", "tech", "évènements"]);
  }

  #[test]
  fn input_order_does_not_change_sums() {
    let mut latest = vec![
      rev(1, 1, "tech", 1, 2, 3),
      rev(2, 1, "tech", -1, 5, 8),
      rev(3, 1, "news", 7, -1, 1),
    ];
    let forward = aggregate(&latest);
    latest.reverse();
    assert_eq!(aggregate(&latest), forward);
  }
}
