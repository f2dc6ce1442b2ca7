//! Regression models

use chrono::NaiveDate;

/// Ordinary least squares fit of `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub samples: usize,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Close estimate derived from the latest session's open
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub latest_date: NaiveDate,
    pub latest_open: f64,
    /// Five days past `latest_date`. Reported only; the model is queried with `latest_open`.
    pub horizon_date: NaiveDate,
    pub predicted_close: f64,
    pub fit: LinearFit,
}
