//! Data models for the stockcast pipeline
//!
//! Each model is the output of one pipeline step and lives for a single request.

pub mod chart;
pub mod home;
pub mod prediction;
pub mod price;

// Re-export commonly used types for convenience
pub use chart::PricePoint;
pub use home::HomeView;
pub use prediction::{LinearFit, PredictionResult};
pub use price::{Period, PriceBar, PriceSeries};
