//! Handler for `GET /stats`.
//!
//! Recomputes the per-topic report from the store's full revision set on
//! every request. An empty store yields `{"topics": []}`.

use std::sync::Arc;

use axum::{Json, extract::State};
use poststats_core::{
  report::TopicReport,
  store::{RevisionStore, collect_statistics},
};

use crate::error::ApiError;

/// `GET /stats`
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<Json<TopicReport>, ApiError>
where
  S: RevisionStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let report = collect_statistics(store.as_ref())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::debug!(topics = report.topics.len(), "computed topic statistics");
  Ok(Json(report))
}
