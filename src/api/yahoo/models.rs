use serde::{Deserialize, Serialize};

/// Top-level body of GET /v8/finance/chart/{ticker}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

/// Either `result` or `error` is populated, never both
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

/// Error object embedded in chart responses (also sent with 4xx statuses)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: Option<String>,
}

/// One instrument's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    pub currency: Option<String>,
    /// Seconds east of UTC for the listing exchange
    #[serde(default)]
    pub gmtoffset: i64,
    pub exchange_timezone_name: Option<String>,
    pub data_granularity: Option<String>,
    pub range: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
    #[serde(default)]
    pub adjclose: Vec<AdjCloseIndicator>,
}

/// Column-oriented OHLCV arrays aligned with `ChartResult::timestamp`.
/// Holidays and halted sessions show up as nulls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteIndicator {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdjCloseIndicator {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

/// Error type for market data operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 400 / 422, usually a malformed range or interval
    BadRequest(String),
    /// 404 Not Found (unknown symbol)
    NotFound(String),
    /// 429 Too Many Requests
    RateLimited {
        retry_after: Option<u64>,
    },
    /// 5xx Server Error
    ServerError(i32, String),
    /// Other HTTP errors
    HttpError(i32, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
    /// 2xx response without any usable result
    NoData(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::RateLimited { retry_after } => match retry_after {
                Some(secs) => write!(f, "Rate Limited. Retry after {} s", secs),
                None => write!(f, "Rate Limited"),
            },
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
            ApiError::NoData(msg) => write!(f, "No Data: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
