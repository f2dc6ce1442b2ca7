use chrono::{DateTime, NaiveDate};
use tracing::{debug, info};

use crate::api::yahoo::{ChartResult, YahooFinanceClient};
use crate::models::{Period, PriceBar, PriceSeries};
use crate::utils::AppError;

/// Unit suffix appended to the submitted year count
pub const PERIOD_UNIT: &str = "y";
/// Daily bars
pub const DAILY_INTERVAL: &str = "1d";

/// Convert the submitted number of years into a period expression
/// Examples: "1" -> "1y", " 10 " -> "10y"; "abc", "0", "-2" and "" are rejected
pub fn parse_period(number_of_years: &str) -> Result<Period, AppError> {
    let trimmed = number_of_years.trim();

    let years = trimmed
        .parse::<u32>()
        .ok()
        .filter(|y| *y > 0)
        .ok_or_else(|| AppError::InvalidYears(number_of_years.to_string()))?;

    Ok(Period {
        years,
        expression: format!("{}{}", years, PERIOD_UNIT),
    })
}

/// Build adjusted daily bars from the column-oriented chart payload.
///
/// Open/High/Low are scaled by `adjclose / close` and Close becomes the
/// adjusted close. Sessions without an open or close are dropped.
pub fn bars_from_chart(result: &ChartResult) -> Vec<PriceBar> {
    let Some(quote) = result.indicators.quote.first() else {
        return Vec::new();
    };
    let adjclose = result.indicators.adjclose.first().map(|a| a.adjclose.as_slice());
    let offset = result.meta.gmtoffset;

    let mut bars: Vec<PriceBar> = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let open = quote.open.get(i).copied().flatten()?;
            let close = quote.close.get(i).copied().flatten()?;
            let high = quote.high.get(i).copied().flatten().unwrap_or(open.max(close));
            let low = quote.low.get(i).copied().flatten().unwrap_or(open.min(close));
            let volume = quote.volume.get(i).copied().flatten().unwrap_or(0);
            let date = session_date(ts, offset)?;

            let ratio = adjclose
                .and_then(|a| a.get(i).copied().flatten())
                .filter(|_| close != 0.0)
                .map(|adj| adj / close)
                .unwrap_or(1.0);

            Some(PriceBar {
                date,
                open: open * ratio,
                high: high * ratio,
                low: low * ratio,
                close: close * ratio,
                volume,
            })
        })
        .collect();

    bars.sort_by_key(|b| b.date);
    bars
}

/// Exchange-local calendar date of a session timestamp
fn session_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0).map(|dt| dt.date_naive())
}

/// Fetch the full daily history for `ticker` over the trailing period
pub async fn fetch_price_history(
    client: &YahooFinanceClient,
    ticker: &str,
    period: &Period,
) -> Result<PriceSeries, AppError> {
    info!("Fetching {} history for {}", period.expression, ticker);

    let result = client.get_chart(ticker, &period.expression, DAILY_INTERVAL).await?;
    let bars = bars_from_chart(&result);

    debug!(
        "✓ {} bars for {} ({} timestamps received)",
        bars.len(),
        ticker,
        result.timestamp.len()
    );

    Ok(PriceSeries {
        ticker: ticker.to_string(),
        period: period.expression.clone(),
        bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::yahoo::models::{AdjCloseIndicator, ChartMeta, Indicators, QuoteIndicator};
    use crate::test_support::spawn_stub;

    fn meta() -> ChartMeta {
        ChartMeta {
            symbol: "AAPL".to_string(),
            currency: Some("USD".to_string()),
            gmtoffset: -18000,
            exchange_timezone_name: Some("America/New_York".to_string()),
            data_granularity: Some("1d".to_string()),
            range: Some("1y".to_string()),
        }
    }

    #[test]
    fn test_parse_period_appends_unit() {
        for n in [1u32, 2, 5, 10, 25] {
            let period = parse_period(&n.to_string()).unwrap();
            assert_eq!(period.years, n);
            assert_eq!(period.expression, format!("{}y", n));
        }
        assert_eq!(parse_period(" 3 ").unwrap().expression, "3y");
    }

    #[test]
    fn test_parse_period_rejects_non_positive_integers() {
        for input in ["abc", "", "0", "-2", "1.5", "2y"] {
            assert!(
                matches!(parse_period(input), Err(AppError::InvalidYears(_))),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_bars_are_adjusted_and_nulls_dropped() {
        // 2024-01-02 14:30 UTC and the following day
        let result = ChartResult {
            meta: meta(),
            timestamp: vec![1_704_205_800, 1_704_292_200, 1_704_378_600],
            indicators: Indicators {
                quote: vec![QuoteIndicator {
                    open: vec![Some(100.0), None, Some(110.0)],
                    high: vec![Some(104.0), None, None],
                    low: vec![Some(96.0), None, None],
                    close: vec![Some(102.0), None, Some(108.0)],
                    volume: vec![Some(10), None, None],
                }],
                adjclose: vec![AdjCloseIndicator {
                    adjclose: vec![Some(51.0), None, Some(108.0)],
                }],
            },
        };

        let bars = bars_from_chart(&result);

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert!((bars[0].open - 50.0).abs() < 1e-9);
        assert!((bars[0].high - 52.0).abs() < 1e-9);
        assert!((bars[0].low - 48.0).abs() < 1e-9);
        assert!((bars[0].close - 51.0).abs() < 1e-9);
        assert_eq!(bars[0].volume, 10);
        // missing high/low fall back to the open/close envelope, volume to zero
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        assert_eq!(bars[1].high, 110.0);
        assert_eq!(bars[1].low, 108.0);
        assert_eq!(bars[1].volume, 0);
    }

    #[test]
    fn test_missing_adjclose_keeps_raw_prices() {
        let result = ChartResult {
            meta: meta(),
            timestamp: vec![1_704_205_800],
            indicators: Indicators {
                quote: vec![QuoteIndicator {
                    open: vec![Some(10.0)],
                    high: vec![Some(11.0)],
                    low: vec![Some(9.0)],
                    close: vec![Some(10.5)],
                    volume: vec![Some(1)],
                }],
                adjclose: Vec::new(),
            },
        };

        let bars = bars_from_chart(&result);
        assert_eq!(bars[0].open, 10.0);
        assert_eq!(bars[0].close, 10.5);
    }

    #[tokio::test]
    async fn test_fetch_price_history_from_provider() {
        let stub = spawn_stub(true).await;
        let client = YahooFinanceClient::with_base_url(reqwest::Client::new(), stub.base_url.clone());
        let period = parse_period("1").unwrap();

        let series = fetch_price_history(&client, "AAPL", &period).await.unwrap();

        assert_eq!(series.ticker, "AAPL");
        assert_eq!(series.period, "1y");
        assert_eq!(series.len(), 5);
        assert!(series.bars.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(series.latest().map(|b| b.open), Some(183.0));
    }

    #[tokio::test]
    async fn test_provider_rejection_surfaces_as_api_error() {
        let stub = spawn_stub(true).await;
        let client = YahooFinanceClient::with_base_url(reqwest::Client::new(), stub.base_url.clone());
        let period = Period { years: 0, expression: "abcy".to_string() };

        let err = fetch_price_history(&client, "AAPL", &period).await.unwrap_err();

        assert!(matches!(err, AppError::Api(_)));
    }
}
