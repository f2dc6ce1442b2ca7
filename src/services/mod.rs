pub mod chart_service;
pub mod prediction_service;
pub mod price_service;
pub mod snapshot_service;
