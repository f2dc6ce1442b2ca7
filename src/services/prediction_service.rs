use chrono::Duration;
use tracing::{debug, info};

use crate::models::{LinearFit, PredictionResult, PriceSeries};
use crate::utils::AppError;

/// Days between the latest session and the reported horizon date
pub const HORIZON_DAYS: i64 = 5;

/// Ordinary least squares with intercept for a single feature.
///
/// When `xs` has no variance (including a single sample) the slope is 0 and
/// the intercept is the mean of `ys`, the minimum-norm least-squares solution.
pub fn fit_linear_regression(xs: &[f64], ys: &[f64]) -> Result<LinearFit, AppError> {
    if xs.len() != ys.len() {
        return Err(AppError::Regression(format!(
            "feature/target length mismatch ({} vs {})",
            xs.len(),
            ys.len()
        )));
    }
    if xs.is_empty() {
        return Err(AppError::Regression("no samples to fit".to_string()));
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(AppError::Regression("non-finite sample".to_string()));
    }

    let n = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = ys.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        num += (x - x_mean) * (y - y_mean);
        den += (x - x_mean) * (x - x_mean);
    }

    let slope = if den.abs() < 1e-12 { 0.0 } else { num / den };

    Ok(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
        samples: xs.len(),
    })
}

/// Fit Open -> Close over the whole series and predict from the latest open
pub fn predict_close(series: &PriceSeries) -> Result<PredictionResult, AppError> {
    let latest = series
        .latest()
        .ok_or_else(|| AppError::EmptySeries(series.ticker.clone()))?;

    let fit = fit_linear_regression(&series.opens(), &series.closes())?;

    // The horizon is reported, not used as a feature
    let horizon_date = latest.date + Duration::days(HORIZON_DAYS);
    let predicted_close = fit.predict(latest.open);

    debug!(
        "Fit over {} samples: close = {:.6} + {:.6} * open (horizon {})",
        fit.samples, fit.intercept, fit.slope, horizon_date
    );
    info!(
        "📈 Predicted close {:.2} for {} from open {:.2} on {}",
        predicted_close, series.ticker, latest.open, latest.date
    );

    Ok(PredictionResult {
        latest_date: latest.date,
        latest_open: latest.open,
        horizon_date,
        predicted_close,
        fit,
    })
}
