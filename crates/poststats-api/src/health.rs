//! Handlers for the static endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Welcome message |
//! | `GET`  | `/health` | Liveness probe; never touches the store |

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Welcome {
  pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Health {
  pub status: &'static str,
}

/// `GET /`
pub async fn root() -> Json<Welcome> {
  Json(Welcome { message: "Welcome to the poststats API" })
}

/// `GET /health`
pub async fn health() -> Json<Health> { Json(Health { status: "healthy" }) }
