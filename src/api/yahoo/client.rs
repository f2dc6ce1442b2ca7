use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use super::models::{ApiError, ChartResponse, ChartResult};
use crate::utils::extract_provider_message;
use tracing::{debug, warn};

/// Yahoo Finance chart API client for daily price history
pub struct YahooFinanceClient {
    http_client: HttpClient,
    base_url: String,
}

impl YahooFinanceClient {
    const BROWSER_USER_AGENT: &'static str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

    /// Create a client against `base_url`, normally `config::DEFAULT_MARKET_DATA_URL`
    pub fn with_base_url(http_client: HttpClient, base_url: String) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The endpoint rejects requests without a browser-like agent
    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(Self::BROWSER_USER_AGENT));
        headers
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        let body_text = response.text().await.unwrap_or_default();
        let message = extract_provider_message(&body_text);

        match status_code {
            400 | 422 => ApiError::BadRequest(message),
            404 => ApiError::NotFound(message),
            429 => {
                warn!("Rate limited by market data provider, retry after {:?} s", retry_after);
                ApiError::RateLimited { retry_after }
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code as i32, message)
            }
            _ => ApiError::HttpError(status_code as i32, message),
        }
    }

    /// GET /v8/finance/chart/{ticker}
    ///
    /// Retrieves the full bar history for `ticker` over a trailing `range`
    /// such as `"5y"`, sampled at `interval` such as `"1d"`.
    ///
    /// # Returns
    /// * `Ok(ChartResult)` - First (and only) result in the envelope
    /// * `Err(ApiError)` - HTTP, transport or decoding failure, or an empty result
    pub async fn get_chart(
        &self,
        ticker: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResult, ApiError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);
        debug!("GET {} range={} interval={}", url, range, interval);

        let response = self.http_client
            .get(&url)
            .headers(Self::create_headers())
            .query(&[
                ("range", range),
                ("interval", interval),
                ("includePrePost", "false"),
                ("events", "div,splits"),
            ])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .json::<ChartResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if let Some(err) = body.chart.error {
            return Err(ApiError::NoData(
                err.description.unwrap_or(err.code),
            ));
        }

        body.chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ApiError::NoData(format!("No chart result for {}", ticker)))
    }
}
