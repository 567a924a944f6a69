//! [`SqliteStore`] — the SQLite implementation of [`RevisionStore`].

use std::path::Path;

use poststats_core::{
  revision::Revision,
  store::{RevisionStore, StoreSummary},
};

use crate::{
  Result,
  encode::{COLUMNS, RawRevision},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A revision store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every call
/// runs on the connection's own thread, one at a time, so a read never
/// interleaves with the statements of a [`replace_all`](Self::replace_all).
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RevisionStore impl ──────────────────────────────────────────────────────

impl RevisionStore for SqliteStore {
  type Error = crate::Error;

  async fn all_revisions(&self) -> Result<Vec<Revision>> {
    let raws: Vec<RawRevision> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM posts"))?;
        let rows = stmt
          .query_map([], RawRevision::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRevision::into_revision).collect()
  }

  async fn replace_all(&self, revisions: Vec<Revision>) -> Result<usize> {
    let raws: Vec<RawRevision> =
      revisions.iter().map(RawRevision::from_revision).collect();

    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM posts", [])?;
        {
          let mut stmt = tx.prepare(&format!(
            "INSERT INTO posts ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
          ))?;
          for raw in &raws {
            stmt.execute(rusqlite::params![
              raw.post_id,
              raw.topic,
              raw.likes,
              raw.shares,
              raw.comments,
              raw.version,
              raw.timestamp,
            ])?;
          }
        }
        tx.commit()?;
        Ok(raws.len())
      })
      .await?;

    Ok(written)
  }

  async fn summary(&self) -> Result<StoreSummary> {
    let (revisions, entities, topics): (i64, i64, i64) = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*), COUNT(DISTINCT post_id), COUNT(DISTINCT topic)
           FROM posts",
          [],
          |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?)
      })
      .await?;

    Ok(StoreSummary {
      revisions: revisions as u64,
      entities:  entities as u64,
      topics:    topics as u64,
    })
  }
}
