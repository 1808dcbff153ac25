//! BizTime server binary
//!
//! Reads configuration from `BIZTIME_CONFIG` and the environment, opens the
//! configured record store and serves the REST API until SIGTERM or Ctrl+C.

use anyhow::{Context, Result};
use biztime::config::{AppConfig, StoreKind};
use biztime::server::ServerBuilder;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = config.socket_addr()?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        store = %config.store,
        "starting biztime"
    );

    match config.store {
        StoreKind::Memory => serve_memory(addr).await,
        StoreKind::Postgres => serve_postgres(&config, addr).await,
    }
}

#[cfg(feature = "in-memory")]
async fn serve_memory(addr: std::net::SocketAddr) -> Result<()> {
    use biztime::storage::InMemoryStore;

    tracing::warn!("using the in-memory store; records are lost on shutdown");
    ServerBuilder::new()
        .with_store(InMemoryStore::new())
        .serve(addr)
        .await
}

#[cfg(not(feature = "in-memory"))]
async fn serve_memory(_addr: std::net::SocketAddr) -> Result<()> {
    anyhow::bail!("store 'memory' requires the `in-memory` feature")
}

#[cfg(feature = "postgres")]
async fn serve_postgres(config: &AppConfig, addr: std::net::SocketAddr) -> Result<()> {
    use biztime::storage::PostgresStore;

    let store = PostgresStore::connect(&config.database).await?;
    let result = ServerBuilder::new()
        .with_store(store.clone())
        .serve(addr)
        .await;

    store.close().await;
    tracing::info!("database pool closed");
    result
}

#[cfg(not(feature = "postgres"))]
async fn serve_postgres(_config: &AppConfig, _addr: std::net::SocketAddr) -> Result<()> {
    anyhow::bail!("store 'postgres' requires the `postgres` feature")
}
