//! trellis server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! flat-file JSON store, and serves the content API over HTTP.
//!
//! # Password hash generation
//!
//! To generate the argon2 PHC string for `admin_password_hash` in
//! config.toml:
//!
//! ```
//! cargo run -p trellis-api --bin server -- --hash-password
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use argon2::{
  Argon2, PasswordHash, PasswordHasher, password_hash::SaltString,
};
use clap::Parser;
use rand_core::OsRng;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use trellis_api::{
  AppState, ServerConfig,
  auth::{AuthConfig, SessionStore},
};
use trellis_store_json::JsonStore;

#[derive(Parser)]
#[command(author, version, about = "Trellis content service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
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

  // Helper mode: hash a password and exit.
  if cli.hash_password {
    let password = read_password()?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string();
    println!("{hash}");
    return Ok(());
  }

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("TRELLIS"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Reject a malformed password hash at startup, not at first login.
  PasswordHash::new(&server_cfg.admin_password_hash)
    .map_err(|e| anyhow::anyhow!("invalid admin_password_hash: {e}"))?;

  // Open the document store.
  let store = JsonStore::open(&server_cfg.data_dir).await.with_context(|| {
    format!("failed to open store at {:?}", server_cfg.data_dir)
  })?;

  // Build application state.
  let state = AppState {
    store:    Arc::new(store),
    auth:     Arc::new(AuthConfig {
      password_hash: server_cfg.admin_password_hash.clone(),
    }),
    sessions: Arc::new(SessionStore::new(server_cfg.session_ttl_secs)),
  };

  let app = trellis_api::router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a password from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  let stdin = io::stdin();
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  stdin.lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}
