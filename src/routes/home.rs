use axum::extract::State;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;

use super::AppState;
use crate::models::HomeView;
use crate::services::{chart_service, prediction_service, price_service, snapshot_service};
use crate::utils::{page, AppError};

#[derive(Debug, Deserialize)]
pub struct HomeForm {
    pub number_of_years: Option<String>,
}

/// GET / renders the blank form
pub async fn show() -> Html<String> {
    Html(page::render_home(&HomeView::idle()))
}

/// POST / runs the pipeline for the submitted number of years
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<HomeForm>,
) -> Result<Html<String>, AppError> {
    let number_of_years = form
        .number_of_years
        .ok_or(AppError::MissingField("number_of_years"))?;
    tracing::info!("🧮 Prediction requested for {:?} year(s)", number_of_years);

    let view = run_pipeline(&state, &number_of_years).await?;
    Ok(Html(page::render_home(&view)))
}

/// Snapshot, price history, chart, then prediction; the first failure aborts
pub async fn run_pipeline(state: &AppState, number_of_years: &str) -> Result<HomeView, AppError> {
    let config = &state.config;
    let period = price_service::parse_period(number_of_years)?;

    snapshot_service::ensure_snapshot(&state.http_client, &config.snapshot_url, &config.snapshot_path).await?;
    let _snapshot = snapshot_service::load_snapshot(&config.snapshot_path).await?;

    let series = price_service::fetch_price_history(&state.market_data(), &config.ticker, &period).await?;
    if series.is_empty() {
        return Err(AppError::EmptySeries(config.ticker.clone()));
    }

    let plot = chart_service::render_chart_base64(&series)?;
    let prediction = prediction_service::predict_close(&series)?;

    Ok(HomeView::submitted(number_of_years, plot, prediction.predicted_close))
}
