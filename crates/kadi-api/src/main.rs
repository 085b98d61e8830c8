//! kadi server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite session store, restores any prior session, seeds the demo feed,
//! starts the ambient like-growth timer, and serves the JSON API over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use clap::Parser;
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use kadi_api::{AppState, ServerConfig};
use kadi_core::rng::DefaultRandom;
use kadi_store::{DraftBuilder, FeedStore, SessionStore};
use kadi_store_sqlite::SqliteSessionBackend;

#[derive(Parser)]
#[command(author, version, about = "kadi birthday-card server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
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
    .add_source(config::Environment::with_prefix("KADI"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open the session backend and restore any prior session.
  let backend = SqliteSessionBackend::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let session = Arc::new(
    SessionStore::new(backend).with_verification_delay(Duration::from_millis(
      server_cfg.verification_delay_ms,
    )),
  );
  if let Some(member) = session.restore().await {
    tracing::info!(contact_id = %member.contact_id, "restored session");
  }

  // Build the feed and start ambient engagement.
  let feed = Arc::new(
    FeedStore::new(Box::new(DefaultRandom::new()))
      .with_base_url(server_cfg.base_url.clone()),
  );
  if server_cfg.seed_demo {
    feed.seed_demo();
  }
  feed.start_ambient_growth(Duration::from_secs(
    server_cfg.ambient_growth_secs,
  ));

  let state = AppState {
    session,
    draft: Arc::new(Mutex::new(DraftBuilder::new(Box::new(
      DefaultRandom::new(),
    )))),
    feed: Arc::clone(&feed),
  };

  let app = kadi_api::api_router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  // The growth timer must not outlive the server.
  feed.shutdown();

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for shutdown signal");
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
