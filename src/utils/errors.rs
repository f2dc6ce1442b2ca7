use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::api::yahoo::ApiError;
use crate::utils::page;

/// Every way a submission can fail, translated to a page at the HTTP boundary
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing form field: {0}")]
    MissingField(&'static str),
    #[error("Invalid number of years '{0}': expected a positive whole number")]
    InvalidYears(String),
    #[error("Snapshot download failed with HTTP status {status}")]
    SnapshotUnavailable { status: u16 },
    #[error("Snapshot file not found at {path}")]
    SnapshotMissing { path: String },
    #[error("Snapshot request failed: {0}")]
    SnapshotRequest(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Market data error: {0}")]
    Api(#[from] ApiError),
    #[error("No price data returned for {0}")]
    EmptySeries(String),
    #[error("Regression failed: {0}")]
    Regression(String),
    #[error("Chart rendering failed: {0}")]
    Render(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField(_) | AppError::InvalidYears(_) => StatusCode::BAD_REQUEST,
            AppError::SnapshotUnavailable { .. } | AppError::SnapshotRequest(_) | AppError::Api(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::EmptySeries(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::SnapshotMissing { .. }
            | AppError::Io(_)
            | AppError::Json(_)
            | AppError::Regression(_)
            | AppError::Render(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            error!("❌ {} ({})", message, status);
        } else {
            warn!("{} ({})", message, status);
        }
        (status, Html(page::render_error(status, &message))).into_response()
    }
}

/// Extract the human-readable part of a provider error body
///
/// Chart API errors arrive as:
/// `{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}`
///
/// Returns only the meaningful message:
/// "No data found"
pub fn extract_provider_message(body: &str) -> String {
    const MAX_LEN: usize = 200;

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let error = json.pointer("/chart/error").or_else(|| json.pointer("/finance/error"));
        if let Some(err) = error {
            if let Some(desc) = err.get("description").and_then(|v| v.as_str()) {
                return desc.trim().to_string();
            }
            if let Some(code) = err.get("code").and_then(|v| v.as_str()) {
                return code.trim().to_string();
            }
        }
        if let Some(msg) = json.get("message").and_then(|v| v.as_str()) {
            return msg.trim().to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_LEN {
        let cut: String = trimmed.chars().take(MAX_LEN).collect();
        format!("{}…", cut)
    } else {
        trimmed.to_string()
    }
}
