use std::{net::SocketAddr, sync::Arc};

use configs::{AppConfig, ServerConfig, StorageConfig};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;
use service::{file::medicine_store::MedicineFileStore, runtime};

pub fn build_cors(permissive: bool) -> CorsLayer {
    if permissive {
        CorsLayer::very_permissive()
    } else {
        CorsLayer::new()
    }
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("{}:{} ({e})", server.host, server.port)))
}

/// Bind the file store, seeding an empty collection when configured to.
async fn prepare_store(storage: &StorageConfig) -> anyhow::Result<Arc<MedicineFileStore>> {
    let store = MedicineFileStore::new(storage.data_file.as_str());
    if storage.create_if_missing {
        store.seed_if_missing().await?;
    } else if !tokio::fs::try_exists(store.path()).await? {
        warn!(data_file = %storage.data_file, "data file missing; every request will fail until it exists");
    }
    Ok(store)
}

/// Load configuration (file, then env) and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_or_env()?;
    run_with_config(cfg).await
}

/// Build the app from an already-validated config and serve it until the listener fails.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let data_file = cfg.storage.data_file.as_str();
    runtime::ensure_env(cfg.server.static_dir.as_deref(), data_file).await?;

    let store = prepare_store(&cfg.storage).await?;
    let state = AppState::new(store, cfg.api.legacy_error_status);
    let app = routes::build_router(state, build_cors(cfg.api.permissive_cors), cfg.server.static_dir.as_deref());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, %data_file, legacy_error_status = cfg.api.legacy_error_status, "starting medicine store server");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
