//! tally-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite ledger, and either serves the JSON API or imports a CSV file into
//! one of the tables.
//!
//! ```text
//! cargo run -p tally-server -- import --table debts debts.csv
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tally_core::{Ledger, store::Table};
use tally_server::{ServerConfig, notifier::LogNotifier, scheduler};
use tally_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Tally debt ledger server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the HTTP API (the default).
  Serve,
  /// Append the rows of a CSV file (header line first) to a table.
  Import {
    #[arg(long)]
    table: Table,
    file:  PathBuf,
  },
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
    .add_source(
      config::Environment::with_prefix("TALLY")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  server_cfg.validate()?;

  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(store, server_cfg).await,
    Command::Import { table, file } => {
      let count = tally_server::import::import_file(&store, table, &file).await?;
      println!("imported {count} rows into {table}");
      Ok(())
    }
  }
}

async fn serve(store: SqliteStore, server_cfg: ServerConfig) -> anyhow::Result<()> {
  for (table, rows) in store.row_counts().await.context("failed to count rows")? {
    tracing::info!(%table, rows, "store table");
  }

  let ledger = Ledger::new(Arc::new(store));

  if server_cfg.notifications.enabled {
    tracing::info!(
      hour = server_cfg.notifications.hour,
      day = server_cfg.notifications.day,
      "daily job enabled"
    );
    tokio::spawn(scheduler::run_daily(
      ledger.clone(),
      LogNotifier,
      server_cfg.notifications.clone(),
    ));
  }

  let app = tally_server::app(ledger);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
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
