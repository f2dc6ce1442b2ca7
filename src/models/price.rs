//! Price history models

use chrono::NaiveDate;

/// Trailing window handed to the market data provider, e.g. `5y`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub years: u32,
    pub expression: String,
}

/// One daily bar, already split/dividend adjusted
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Daily bars for one ticker, oldest first
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub ticker: String,
    pub period: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Most recent bar
    pub fn latest(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn opens(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.open).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}
