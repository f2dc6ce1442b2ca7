use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod routes;
mod services;
mod utils;
#[cfg(test)]
mod test_support;

use crate::config::AppConfig;
use crate::routes::AppState;
use crate::services::snapshot_service::{self, SnapshotStatus};

const DEFAULT_LOG_DIRECTIVES: &str = "stockcast=debug,hyper=warn,reqwest=warn";

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📈 Starting stockcast v{}...", env!("CARGO_PKG_VERSION"));

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return;
        }
    };
    info!("Ticker: {}, snapshot: {}", config.ticker, config.snapshot_path.display());

    let http_client = match reqwest::Client::builder().build() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return;
        }
    };

    // Fetch the snapshot before serving so requests do not race to create it
    match snapshot_service::ensure_snapshot(&http_client, &config.snapshot_url, &config.snapshot_path).await {
        Ok(SnapshotStatus::Downloaded) => info!("Snapshot downloaded"),
        Ok(SnapshotStatus::AlreadyPresent) => info!("Snapshot already present"),
        Err(e) => warn!("Snapshot not available at startup, will retry on first submission: {}", e),
    }

    let bind_addr = config.bind_addr;
    let app = routes::router(AppState::new(config, http_client));

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", bind_addr, e);
            return;
        }
    };
    info!("HTTP server running on http://{}", bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
