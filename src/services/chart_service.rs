use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::fs;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

use crate::models::{PricePoint, PriceSeries};
use crate::utils::AppError;

pub const CHART_TITLE: &str = "Apple Stock Opening Price";
/// 10x5 at 100 dpi
pub const CHART_WIDTH: u32 = 1000;
pub const CHART_HEIGHT: u32 = 500;

/// Opening prices as chart points, timestamped at midnight UTC of each session
pub fn opening_points(series: &PriceSeries) -> Vec<PricePoint> {
    series
        .bars
        .iter()
        .map(|bar| PricePoint::for_session(bar.date, bar.open))
        .collect()
}

/// Generate the opening-price line chart as PNG bytes
pub fn render_opening_price_chart(
    series: &PriceSeries,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, AppError> {
    let price_points = opening_points(series);

    if price_points.is_empty() {
        return Err(AppError::EmptySeries(series.ticker.clone()));
    }

    let image_data = with_temp_png(|temp_file| draw_opening_prices(temp_file, &price_points, width, height))?;

    debug!("✓ Chart rendered: {} points, {} bytes", price_points.len(), image_data.len());
    Ok(image_data)
}

/// Run `draw` against a fresh temp path and return the PNG it wrote.
///
/// BitMapBackend encodes PNG only when writing to a path, and writes on drop
/// even after a failed draw, so the file is removed on every path.
fn with_temp_png<F>(draw: F) -> Result<Vec<u8>, AppError>
where
    F: FnOnce(&Path) -> Result<(), AppError>,
{
    let temp_file = std::env::temp_dir().join(format!("stockcast_chart_{}.png", Uuid::new_v4()));

    let result = draw(&temp_file).and_then(|_| {
        fs::read(&temp_file)
            .map_err(|e| AppError::Render(format!("Failed to read chart file: {}", e)))
    });

    let _ = fs::remove_file(&temp_file);
    result
}

fn draw_opening_prices(
    temp_file: &Path,
    price_points: &[PricePoint],
    width: u32,
    height: u32,
) -> Result<(), AppError> {
    {
        let backend = BitMapBackend::new(temp_file, (width, height));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| AppError::Render(format!("Failed to fill canvas: {}", e)))?;

        let min_price = price_points.iter()
            .map(|p| p.price)
            .fold(f64::INFINITY, f64::min);
        let max_price = price_points.iter()
            .map(|p| p.price)
            .fold(f64::NEG_INFINITY, f64::max);

        let price_range = (max_price - min_price).max(max_price.abs() * 0.01).max(1e-8);
        let padding = price_range * 0.05;
        let y_min = (min_price - padding).max(0.0);
        let y_max = max_price + padding;

        let x_min = price_points[0].timestamp;
        let mut x_max = price_points[price_points.len() - 1].timestamp;
        if x_max <= x_min {
            x_max = x_min + Duration::days(1);
        }

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, ("sans-serif", 24).into_font())
            .margin(15)
            .x_label_area_size(90)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| AppError::Render(format!("Failed to build chart: {}", e)))?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Opening Price")
            .x_labels(12)
            .x_label_formatter(&|ts: &DateTime<Utc>| ts.format("%Y-%m-%d").to_string())
            .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
            .draw()
            .map_err(|e| AppError::Render(format!("Failed to draw mesh: {}", e)))?;

        chart
            .draw_series(LineSeries::new(
                price_points.iter().map(|p| (p.timestamp, p.price)),
                &BLUE,
            ))
            .map_err(|e| AppError::Render(format!("Failed to draw line: {}", e)))?;

        root.present()
            .map_err(|e| AppError::Render(format!("Failed to render chart: {}", e)))?;
    }
    Ok(())
}

/// Standard, padded base64 for embedding in a data URI
pub fn encode_chart_base64(png: &[u8]) -> String {
    BASE64.encode(png)
}

/// Render at the default size and encode for the page
pub fn render_chart_base64(series: &PriceSeries) -> Result<String, AppError> {
    let png = render_opening_price_chart(series, CHART_WIDTH, CHART_HEIGHT)?;
    Ok(encode_chart_base64(&png))
}
