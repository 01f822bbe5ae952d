use anyhow::{Context, Result};
use log::info;
use simple_logger::SimpleLogger;
use std::sync::Arc;
use tokio::net::TcpListener;

use blockcraft::{
    config::{default_config_path, AppConfig, StoreKind},
    profile::{FileStore, MemoryStore, PlayerStore},
    server::{self, AppState},
    RpcClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = match std::env::var_os("BLOCKCRAFT_CONFIG") {
        Some(path) => path.into(),
        None => default_config_path()?,
    };
    let mut config = AppConfig::load_or_create(&config_path)?;
    config.apply_env_overrides(|key| std::env::var(key).ok())?;

    SimpleLogger::new()
        .with_level(config.log_filter())
        .init()
        .context("Failed to initialise logger")?;
    info!("Loaded config from {}", config_path.display());

    let store: Arc<dyn PlayerStore> = match config.server.store {
        StoreKind::Memory => {
            info!("Using in-memory player store");
            Arc::new(MemoryStore::new())
        }
        StoreKind::File => {
            let dir = config.data_dir()?;
            info!("Storing players under {}", dir.display());
            Arc::new(FileStore::open(dir).context("Failed to open player store")?)
        }
    };

    let chain = RpcClient::from_config(&config.chain).context("Failed to build RPC client")?;
    info!(
        "Using {} (chain {}) via {}",
        config.chain.chain_name,
        config.chain.chain_id,
        chain.url()
    );

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let state = AppState::new(store, chain, config.server.clone());
    server::serve(listener, state).await.context("Server error")?;
    Ok(())
}
