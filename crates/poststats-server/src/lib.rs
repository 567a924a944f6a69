//! Process wiring for the poststats server.
//!
//! Holds the runtime configuration, the startup ingest and the fully-layered
//! axum application. The binary in `main.rs` only parses arguments, sets up
//! logging and calls into here.

pub mod ingest;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::Router;
use poststats_core::store::RevisionStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `POSTSTATS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  #[serde(default = "default_store_path")]
  pub store_path:           PathBuf,
  /// CSV export loaded into the store at startup.
  #[serde(default = "default_data_path")]
  pub data_path:            PathBuf,
  /// Upper bound on the time spent serving one request.
  #[serde(default = "default_request_timeout_secs")]
  pub request_timeout_secs: u64,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8000 }

fn default_store_path() -> PathBuf { PathBuf::from("posts.db") }

fn default_data_path() -> PathBuf { PathBuf::from("data/mock_posts.csv") }

fn default_request_timeout_secs() -> u64 { 30 }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 default_host(),
      port:                 default_port(),
      store_path:           default_store_path(),
      data_path:            default_data_path(),
      request_timeout_secs: default_request_timeout_secs(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// Build the served application: the API router wrapped in request tracing,
/// permissive CORS and a per-request timeout.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: RevisionStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  poststats_api::api_router(store)
    .layer(TimeoutLayer::new(Duration::from_secs(
      config.request_timeout_secs,
    )))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::path::Path;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use poststats_core::{
    report::{TopicReport, TopicSummary},
    store::StoreSummary,
    topic_statistics,
  };
  use poststats_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/mock_posts.csv")
  }

  fn summary(
    topic: &str,
    posts_count: u64,
    total_likes: u128,
    total_shares: u128,
    total_comments: u128,
  ) -> TopicSummary {
    TopicSummary {
      topic: topic.to_string(),
      posts_count,
      total_likes,
      total_shares,
      total_comments,
    }
  }

  fn expected_report() -> TopicReport {
    TopicReport {
      topics: vec![
        summary("finance", 4, 24, 52, 41),
        summary("health", 4, 28, 22, 29),
        summary("news", 3, 49, 25, 22),
        summary("sports", 4, 43, 19, 36),
        summary("tech", 3, 40, 25, 41),
      ],
    }
  }

  async fn loaded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().await.unwrap();
    ingest::load_csv(&store, &fixture()).await.unwrap();
    store
  }

  async fn get(router: Router, uri: &str, origin: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(origin) = origin {
      builder = builder.header(header::ORIGIN, origin);
    }
    router
      .oneshot(builder.body(Body::empty()).unwrap())
      .await
      .unwrap()
  }

  // ── Ingest ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn fixture_loads_fifty_revisions_of_eighteen_posts() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let loaded = ingest::load_csv(&store, &fixture()).await.unwrap();
    assert_eq!(
      loaded,
      StoreSummary { revisions: 50, entities: 18, topics: 5 }
    );
  }

  #[tokio::test]
  async fn reload_replaces_rather_than_appends() {
    let store = loaded_store().await;
    let again = ingest::load_csv(&store, &fixture()).await.unwrap();
    assert_eq!(again.revisions, 50);
  }

  #[tokio::test]
  async fn missing_file_keeps_previous_contents() {
    let store = loaded_store().await;
    let err = ingest::load_csv(&store, Path::new("/nonexistent/posts.csv"))
      .await
      .unwrap_err();
    assert!(matches!(err, ingest::IngestError::Read { .. }));
    assert_eq!(store.summary().await.unwrap().revisions, 50);
  }

  #[tokio::test]
  async fn malformed_file_keeps_previous_contents() {
    let store = loaded_store().await;
    let path = std::env::temp_dir().join(format!(
      "poststats-malformed-{}.csv",
      std::process::id()
    ));
    std::fs::write(
      &path,
      "post_id,topic,likes,shares,comments,version,timestamp\n1,tech,x,1,1,1,2024-01-01\n",
    )
    .unwrap();

    let err = ingest::load_csv(&store, &path).await.unwrap_err();
    let _ = std::fs::remove_file(&path);

    assert!(matches!(err, ingest::IngestError::Parse { .. }));
    assert_eq!(store.summary().await.unwrap().revisions, 50);
  }

  // ── /stats over the reference data ──────────────────────────────────────────

  #[tokio::test]
  async fn stats_over_reference_data() {
    let store = loaded_store().await;
    let resp = get(app(Arc::new(store), &ServerConfig::default()), "/stats", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let report: TopicReport = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report, expected_report());

    let health = report.get("health").unwrap();
    assert_eq!(health.posts_count, 4);
    assert_eq!(health.total_likes, 28);
    assert_eq!(health.total_shares, 22);
    assert_eq!(health.total_comments, 29);
  }

  #[test]
  fn reference_report_is_independent_of_row_order() {
    let mut revisions = poststats_csv::read_file(fixture()).unwrap();
    assert_eq!(topic_statistics(revisions.clone()), expected_report());

    revisions.reverse();
    assert_eq!(topic_statistics(revisions.clone()), expected_report());

    revisions.sort_by(|a, b| b.topic.cmp(&a.topic).then(a.version.cmp(&b.version)));
    assert_eq!(topic_statistics(revisions), expected_report());
  }

  #[tokio::test]
  async fn empty_store_serves_empty_topic_list() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let resp = get(app(Arc::new(store), &ServerConfig::default()), "/stats", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    assert_eq!(&bytes[..], br#"{"topics":[]}"#);
  }

  // ── Layers ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn cors_allows_any_origin() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let resp = get(
      app(Arc::new(store), &ServerConfig::default()),
      "/health",
      Some("http://dashboard.example"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );
  }

  // ── Configuration ───────────────────────────────────────────────────────────

  fn config_from_toml(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = config_from_toml("");
    assert_eq!(cfg.address(), "0.0.0.0:8000");
    assert_eq!(cfg.store_path, PathBuf::from("posts.db"));
    assert_eq!(cfg.data_path, PathBuf::from("data/mock_posts.csv"));
    assert_eq!(cfg.request_timeout_secs, 30);
  }

  #[tokio::test]
  async fn default_data_path_loads_bundled_fixture() {
    let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let path = workspace.join(ServerConfig::default().data_path);
    let store = SqliteStore::open_in_memory().await.unwrap();
    let loaded = ingest::load_csv(&store, &path).await.unwrap();
    assert_eq!(loaded.revisions, 50);
  }

  #[test]
  fn config_file_overrides_defaults() {
    let cfg = config_from_toml(
      r#"
        host = "127.0.0.1"
        port = 9090
        store_path = "/var/lib/poststats/posts.db"
        data_path = "mock_posts.csv"
        request_timeout_secs = 5
      "#,
    );
    assert_eq!(cfg.address(), "127.0.0.1:9090");
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/poststats/posts.db"));
    assert_eq!(cfg.data_path, PathBuf::from("mock_posts.csv"));
    assert_eq!(cfg.request_timeout_secs, 5);
  }
}
