//! Revision — one observed state of a post at a point in its version history.
//!
//! Revisions are immutable values. Every revision of the same post shares an
//! [`EntityId`]; the one with the highest `version` is the post's current
//! state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Stable identifier shared by every revision of one post.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl fmt::Display for EntityId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// The value reserved for "not measured" in the engagement counters.
///
/// Any non-positive counter is treated the same way by the aggregator; this
/// constant only names the value producers are expected to write.
pub const MISSING: i64 = -1;

/// One versioned snapshot of a post's topic and engagement counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
  pub entity_id: EntityId,
  /// Higher is newer. Not guaranteed contiguous.
  pub version:   u32,
  pub topic:     String,
  /// Negative values mean the counter was not measured.
  pub likes:     i64,
  pub shares:    i64,
  pub comments:  i64,
  /// When the revision was recorded. Metadata only; `version` decides
  /// which revision is newest.
  pub timestamp: DateTime<Utc>,
}

impl Revision {
  /// Check the invariants the engine relies on but cannot express in types.
  pub fn validate(&self) -> Result<()> {
    if self.topic.trim().is_empty() {
      return Err(Error::EmptyTopic);
    }
    Ok(())
  }
}

/// Narrow a signed version number, as stored by tabular and SQL sources,
/// to the engine's `u32`.
pub fn version_from_i64(raw: i64) -> Result<u32> {
  u32::try_from(raw).map_err(|_| Error::InvalidVersion(raw))
}

/// The counter value if it is a real measurement, `None` for sentinels and
/// other non-positive values.
pub fn measured(value: i64) -> Option<u64> {
  if value > 0 { Some(value as u64) } else { None }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_helpers::rev;

  #[test]
  fn version_conversion_rejects_negative_and_oversized() {
    assert_eq!(version_from_i64(0).unwrap(), 0);
    assert_eq!(version_from_i64(42).unwrap(), 42);
    assert!(matches!(version_from_i64(-1), Err(Error::InvalidVersion(-1))));
    assert!(version_from_i64(i64::from(u32::MAX) + 1).is_err());
  }

  #[test]
  fn measured_excludes_sentinel_and_zero() {
    assert_eq!(measured(MISSING), None);
    assert_eq!(measured(-7), None);
    assert_eq!(measured(0), None);
    assert_eq!(measured(12), Some(12));
  }

  #[test]
  fn blank_topic_fails_validation() {
    assert!(rev(1, 1, "tech", 0, 0, 0).validate().is_ok());
    assert!(matches!(
      rev(1, 1, "  ", 0, 0, 0).validate(),
      Err(Error::EmptyTopic)
    ));
  }

  #[test]
  fn entity_id_serializes_as_plain_integer() {
    let json = serde_json::to_string(&EntityId(18)).unwrap();
    assert_eq!(json, "18");
    assert_eq!(EntityId(18).to_string(), "18");
  }
}
