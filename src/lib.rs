pub mod config;
pub mod server;
pub mod themes;
pub mod utils;

use crate::config::AppConfig;
use crate::server::{ApiContext, ThemeServer};
use crate::themes::{JsonFileStore, ThemeStore};
use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

/// Open the data directory and serve the API until SIGINT/SIGTERM.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = config
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {:?}", config.bind))?;

    let store = Arc::new(JsonFileStore::new(&config.data_dir));
    info!(
        data_dir = %store.data_dir().display(),
        item_policy = ?config.item_policy,
        "[Themes] Using JSON file store"
    );
    if config.seed_missing_slots {
        store
            .seed_missing()
            .await
            .context("failed to seed missing slot files")?;
    }

    let store: Arc<dyn ThemeStore> = store;
    let mut server = ThemeServer::new(ApiContext::new(store, config.item_policy), config.cors);
    server
        .serve(addr, shutdown_signal())
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("[HTTP] Could not register signal handlers, falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("[HTTP] Shutdown requested");
}
