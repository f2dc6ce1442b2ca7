//! Local stand-ins for the snapshot host and the chart API

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const SNAPSHOT_BODY: &str = r#"{"symbol":"AAPL","longName":"Apple Inc.","sector":"Technology"}"#;

/// Body served by the chart endpoint for valid requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// Six sessions from `chart_fixture`
    History,
    /// A result whose timestamp and quote arrays are empty
    NoRows,
    /// `"result": []`
    EmptyResult,
    /// HTTP 200 with `chart.error` set
    ErrorEnvelope,
}

#[derive(Clone)]
struct StubState {
    snapshot_ok: bool,
    chart_mode: ChartMode,
    calls: Arc<Mutex<Vec<String>>>,
}

pub struct StubServer {
    pub base_url: String,
    pub snapshot_url: String,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Paths requested so far, in arrival order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

/// Six sessions of AAPL with one halted (all-null) row in the middle
pub fn chart_fixture() -> Value {
    let start = 1_704_205_800i64;
    let timestamps: Vec<i64> = (0..6).map(|i| start + i * 86_400).collect();
    json!({
        "chart": {
            "result": [{
                "meta": {
                    "symbol": "AAPL",
                    "currency": "USD",
                    "gmtoffset": -18000,
                    "exchangeTimezoneName": "America/New_York",
                    "dataGranularity": "1d",
                    "range": "1y"
                },
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open":   [185.0, 184.0, null, 182.0, 181.5, 183.0],
                        "high":   [186.0, 185.0, null, 183.0, 182.5, 184.0],
                        "low":    [183.0, 182.0, null, 180.0, 180.5, 182.0],
                        "close":  [185.5, 183.0, null, 181.0, 182.5, 184.5],
                        "volume": [1000, 2000, null, 1500, 1200, 1800]
                    }],
                    "adjclose": [{
                        "adjclose": [185.5, 183.0, null, 181.0, 182.5, 184.5]
                    }]
                }
            }],
            "error": null
        }
    })
}

async fn snapshot(State(state): State<StubState>) -> impl IntoResponse {
    if let Ok(mut calls) = state.calls.lock() {
        calls.push("/apple.json".to_string());
    }
    if state.snapshot_ok {
        (StatusCode::OK, SNAPSHOT_BODY.to_string())
    } else {
        (StatusCode::NOT_FOUND, "gone".to_string())
    }
}

async fn chart(
    State(state): State<StubState>,
    Path(ticker): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if let Ok(mut calls) = state.calls.lock() {
        calls.push(format!("/v8/finance/chart/{}", ticker));
    }

    if ticker != "AAPL" {
        let body = json!({"chart": {"result": null, "error": {
            "code": "Not Found",
            "description": "No data found, symbol may be delisted"
        }}});
        return (StatusCode::NOT_FOUND, Json(body));
    }

    let range = params.get("range").cloned().unwrap_or_default();
    let valid = range
        .strip_suffix('y')
        .map(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false);
    if !valid {
        let body = json!({"chart": {"result": null, "error": {
            "code": "Unprocessable Entity",
            "description": format!("Invalid input - range {} is not supported", range)
        }}});
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(body));
    }

    let body = match state.chart_mode {
        ChartMode::History => chart_fixture(),
        ChartMode::NoRows => json!({"chart": {"result": [{
            "meta": {"symbol": "AAPL", "gmtoffset": -18000},
            "timestamp": [],
            "indicators": {"quote": [{}], "adjclose": [{}]}
        }], "error": null}}),
        ChartMode::EmptyResult => json!({"chart": {"result": [], "error": null}}),
        ChartMode::ErrorEnvelope => json!({"chart": {"result": null, "error": {
            "code": "Internal Server Error",
            "description": "boom"
        }}}),
    };
    (StatusCode::OK, Json(body))
}

/// Spawn the stub on an ephemeral port
pub async fn spawn_stub(snapshot_ok: bool) -> StubServer {
    spawn_stub_with(snapshot_ok, ChartMode::History).await
}

pub async fn spawn_stub_with(snapshot_ok: bool, chart_mode: ChartMode) -> StubServer {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = StubState { snapshot_ok, chart_mode, calls: calls.clone() };

    let app = Router::new()
        .route("/apple.json", get(snapshot))
        .route("/v8/finance/chart/:ticker", get(chart))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let base_url = format!("http://{}", addr);
    StubServer {
        snapshot_url: format!("{}/apple.json", base_url),
        base_url,
        calls,
    }
}

/// A path under the temp dir that does not exist yet
pub fn temp_path(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}_{}.json", prefix, uuid::Uuid::new_v4()))
}
