//! poststats server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, replaces its contents with the configured CSV export and
//! serves the statistics API over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use poststats_server::{ServerConfig, ingest};
use poststats_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Per-topic post statistics server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// CSV export to load at startup, overriding `data_path` from the config.
  #[arg(short, long)]
  data: Option<PathBuf>,

  /// Serve whatever the store already holds instead of loading a CSV.
  #[arg(long)]
  skip_load: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("POSTSTATS"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  if let Some(data) = cli.data {
    server_cfg.data_path = data;
  }

  // Expand `~` in paths.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Startup ingest.
  if cli.skip_load {
    tracing::warn!("startup load skipped; serving existing store contents");
  } else {
    let data_path = expand_tilde(&server_cfg.data_path);
    ingest::load_csv(&store, &data_path)
      .await
      .with_context(|| format!("failed to load {data_path:?}"))?;
  }

  let app = poststats_server::app(Arc::new(store), &server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("shut down");
  Ok(())
}

/// Resolve once Ctrl-C is received.
async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!("failed to listen for shutdown signal: {e}");
    std::future::pending::<()>().await;
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
