//! Address admin server
//!
//! Reads the YAML file named by `ADDRESS_ADMIN_CONFIG` (defaults otherwise),
//! honours `ADDRESS_ADMIN_BIND` and `RUST_LOG`, and serves the address API
//! over an in-memory store.

use address_admin::config::AppConfig;
use address_admin::server::ServerBuilder;
use address_admin::storage::InMemoryAddressStore;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    let bind = config.server.bind.clone();

    if config.auth.sessions.is_empty() {
        tracing::warn!("No sessions configured; every protected operation will be rejected");
    }

    ServerBuilder::new()
        .with_config(config)
        .with_store(InMemoryAddressStore::new())
        .serve(&bind)
        .await
}
