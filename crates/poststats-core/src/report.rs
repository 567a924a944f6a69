//! The client-facing report assembled from per-topic accumulators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::TopicAccumulator;

/// Aggregate statistics for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSummary {
  pub topic:          String,
  pub posts_count:    u64,
  pub total_likes:    u128,
  pub total_shares:   u128,
  pub total_comments: u128,
}

/// Per-topic statistics, ordered ascending by the UTF-8 bytes of the topic
/// label, so `"Tech"` sorts before `"news"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicReport {
  pub topics: Vec<TopicSummary>,
}

impl TopicReport {
  /// Look up the summary for `topic`.
  pub fn get(&self, topic: &str) -> Option<&TopicSummary> {
    self.topics.iter().find(|s| s.topic == topic)
  }
}

/// Turn accumulators into a report with one entry per topic.
pub fn assemble(groups: BTreeMap<String, TopicAccumulator>) -> TopicReport {
  let topics = groups
    .into_iter()
    .map(|(topic, acc)| TopicSummary {
      topic,
      posts_count: acc.posts_count,
      total_likes: acc.total_likes,
      total_shares: acc.total_shares,
      total_comments: acc.total_comments,
    })
    .collect();
  TopicReport { topics }
}
