use std::net::SocketAddr;

use configs::{AppConfig, ServerConfig};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;
use service::{file::medicine_store::FileMedicineStore, runtime};

/// Any origin, method and header, with credentials.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app and serve it until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.storage.data_file).await?;

    let store = FileMedicineStore::new(cfg.storage.data_file.clone());
    if cfg.storage.seed_if_missing {
        store.seed_if_missing().await?;
    }
    let state = ServerState::new(store);

    let app = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, data_file = %cfg.storage.data_file.display(), "starting medicine store");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
