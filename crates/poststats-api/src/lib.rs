//! JSON HTTP API for poststats.
//!
//! Exposes an axum [`Router`] backed by any
//! [`poststats_core::store::RevisionStore`]. Transport concerns (tracing
//! spans, CORS, timeouts) are layered on by the caller.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = poststats_api::api_router(Arc::new(store));
//! ```

pub mod error;
pub mod health;
pub mod stats;

use std::sync::Arc;

use axum::{Router, routing::get};
use poststats_core::store::RevisionStore;

pub use error::ApiError;

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RevisionStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(health::root))
    .route("/health", get(health::health))
    .route("/stats", get(stats::handler::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
