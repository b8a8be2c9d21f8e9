//! tribunal-node - HTTP host for the dispute arbitration core
//!
//! Startup order: tracing, banner, CLI/config resolution, database,
//! adapters, router, listener.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tribunal_core::store::SqliteStore;
use tribunal_core::Tribunal;
use tribunal_node::adapters::{CompletionOracle, HttpFetcher, LocalQuorumRunner, OutboxLedger};
use tribunal_node::{build_router, AppState, NodeConfig};

#[derive(Parser, Debug)]
#[command(name = "tribunal-node", about = "Dispute arbitration node")]
struct Cli {
    /// Path to TOML config file
    #[arg(long, env = "TRIBUNAL_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address, e.g. 127.0.0.1:5780 (overrides config file)
    #[arg(long, env = "TRIBUNAL_BIND")]
    bind: Option<String>,

    /// SQLite database path (overrides config file)
    #[arg(long, env = "TRIBUNAL_DB")]
    database: Option<PathBuf>,

    /// Oracle API key (overrides config file)
    #[arg(long, env = "TRIBUNAL_ORACLE_API_KEY", hide_env_values = true)]
    oracle_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting tribunal-node v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let mut config = NodeConfig::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(database) = cli.database {
        config.database = database;
    }
    if let Some(api_key) = cli.oracle_api_key {
        config.oracle.api_key = api_key;
    }

    info!("Database path: {}", config.database.display());
    let store = Arc::new(SqliteStore::open(&config.database).await?);
    let ledger = Arc::new(OutboxLedger::new(store.pool().clone()).await?);

    let oracle = Arc::new(CompletionOracle::new(config.oracle.clone())?);
    let runner = Arc::new(LocalQuorumRunner::new(
        oracle.clone(),
        config.consensus_attempts,
    ));
    let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout_secs)?);

    let tribunal = Arc::new(Tribunal::new(
        config.tribunal.clone(),
        store,
        oracle,
        runner,
        fetcher,
        ledger,
    ));

    let app = build_router(AppState::new(tribunal));
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!("tribunal-node listening on http://{}", config.bind);
    info!("Health check: http://{}/health", config.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
