//! Encoding and decoding helpers between [`Revision`] and the plain values
//! stored in the `posts` table.
//!
//! Timestamps are stored as RFC 3339 strings; everything else maps onto
//! SQLite integers and text directly.

use chrono::{DateTime, Utc};
use poststats_core::revision::{EntityId, Revision, version_from_i64};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column values of one `posts` row, in `SELECT`/`INSERT` order.
pub struct RawRevision {
  pub post_id:   i64,
  pub topic:     String,
  pub likes:     i64,
  pub shares:    i64,
  pub comments:  i64,
  pub version:   i64,
  pub timestamp: String,
}

/// Column list shared by reads and writes.
pub const COLUMNS: &str = "post_id, topic, likes, shares, comments, version, timestamp";

impl RawRevision {
  pub fn from_revision(r: &Revision) -> Self {
    Self {
      post_id:   r.entity_id.0,
      topic:     r.topic.clone(),
      likes:     r.likes,
      shares:    r.shares,
      comments:  r.comments,
      version:   i64::from(r.version),
      timestamp: encode_dt(r.timestamp),
    }
  }

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      post_id:   row.get(0)?,
      topic:     row.get(1)?,
      likes:     row.get(2)?,
      shares:    row.get(3)?,
      comments:  row.get(4)?,
      version:   row.get(5)?,
      timestamp: row.get(6)?,
    })
  }

  pub fn into_revision(self) -> Result<Revision> {
    Ok(Revision {
      entity_id: EntityId(self.post_id),
      version:   version_from_i64(self.version)?,
      topic:     self.topic,
      likes:     self.likes,
      shares:    self.shares,
      comments:  self.comments,
      timestamp: decode_dt(&self.timestamp)?,
    })
  }
}
