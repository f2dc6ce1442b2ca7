pub mod home;

use axum::routing::get;
use axum::Router;
use reqwest::Client as HttpClient;
use std::sync::Arc;

use crate::api::yahoo::YahooFinanceClient;
use crate::config::AppConfig;

/// Shared per-process state; cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http_client: HttpClient,
}

impl AppState {
    pub fn new(config: AppConfig, http_client: HttpClient) -> Self {
        Self {
            config: Arc::new(config),
            http_client,
        }
    }

    pub fn market_data(&self) -> YahooFinanceClient {
        YahooFinanceClient::with_base_url(self.http_client.clone(), self.config.market_data_url.clone())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::show).post(home::submit))
        .with_state(state)
}
