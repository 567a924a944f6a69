//! Startup ingest: load a CSV export into the revision store.
//!
//! The file is parsed completely before the store is touched, so a malformed
//! export leaves the previous revision set in place.

use std::path::Path;

use poststats_core::store::{RevisionStore, StoreSummary};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
  #[error("failed to read {path}: {source}")]
  Read {
    path:   String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  Parse {
    path:   String,
    #[source]
    source: poststats_csv::Error,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Replace the store's contents with the revisions in the CSV at `path`.
///
/// Returns the store summary after the replace.
pub async fn load_csv<S>(store: &S, path: &Path) -> Result<StoreSummary, IngestError>
where
  S: RevisionStore,
{
  let display = path.display().to_string();
  tracing::info!(path = %path.display(), "loading revisions");

  let input = tokio::fs::read_to_string(path)
    .await
    .map_err(|source| IngestError::Read { path: display.clone(), source })?;

  let revisions = poststats_csv::parse(&input)
    .map_err(|source| IngestError::Parse { path: display.clone(), source })?;
  tracing::info!(count = revisions.len(), "parsed revisions");

  let written = store
    .replace_all(revisions)
    .await
    .map_err(|e| IngestError::Store(Box::new(e)))?;
  tracing::debug!(written, "replaced revision set");

  let summary = store
    .summary()
    .await
    .map_err(|e| IngestError::Store(Box::new(e)))?;
  tracing::info!(
    revisions = summary.revisions,
    entities = summary.entities,
    topics = summary.topics,
    "store loaded"
  );
  Ok(summary)
}
