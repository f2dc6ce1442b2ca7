//! Home page view model

/// Values rendered into the home page. Both outputs are `None` until a submission succeeds.
#[derive(Debug, Clone, Default)]
pub struct HomeView {
    pub number_of_years: Option<String>,
    /// Base64 PNG of the opening-price chart
    pub plot: Option<String>,
    pub predicted_close_price: Option<f64>,
}

impl HomeView {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn submitted(number_of_years: &str, plot: String, predicted_close_price: f64) -> Self {
        Self {
            number_of_years: Some(number_of_years.to_string()),
            plot: Some(plot),
            predicted_close_price: Some(predicted_close_price),
        }
    }
}
