//! Chart series models

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// One plotted sample: a session and its opening price
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    /// Place a daily value at midnight UTC so sessions are evenly spaced on the time axis
    pub fn for_session(date: NaiveDate, price: f64) -> Self {
        Self {
            timestamp: DateTime::<Utc>::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc),
            price,
        }
    }
}
