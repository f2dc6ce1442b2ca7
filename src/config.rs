use std::net::SocketAddr;
use std::path::PathBuf;

use crate::utils::AppError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_SNAPSHOT_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-PY0220EN-SkillsNetwork/data/apple.json";
pub const DEFAULT_SNAPSHOT_PATH: &str = "apple.json";
pub const DEFAULT_MARKET_DATA_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TICKER: &str = "AAPL";

/// Runtime settings, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub snapshot_url: String,
    pub snapshot_path: PathBuf,
    pub market_data_url: String,
    pub ticker: String,
}

impl AppConfig {
    /// Read `STOCKCAST_*` variables; `.env` must already be loaded
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind = get("STOCKCAST_BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("STOCKCAST_BIND_ADDR '{}': {}", bind, e)))?;

        Ok(Self {
            bind_addr,
            snapshot_url: get("STOCKCAST_SNAPSHOT_URL", DEFAULT_SNAPSHOT_URL),
            snapshot_path: PathBuf::from(get("STOCKCAST_SNAPSHOT_PATH", DEFAULT_SNAPSHOT_PATH)),
            market_data_url: get("STOCKCAST_MARKET_DATA_URL", DEFAULT_MARKET_DATA_URL),
            ticker: get("STOCKCAST_TICKER", DEFAULT_TICKER).to_uppercase(),
        })
    }
}
