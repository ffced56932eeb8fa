//! Yahoo Finance chart API adapter

use crate::error::{AppError, Result};
use crate::market::types::{Bar, Interval, LiveQuote, Period};
use crate::market::MarketDataProvider;
use async_trait::async_trait;
use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

// The v7 quote endpoint is restricted; the chart endpoint works unauthenticated
// with a browser User-Agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// Yahoo Finance market-data provider
pub struct YahooProvider {
    client: Client,
}

impl YahooProvider {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    async fn fetch_chart(
        &self,
        ticker: &str,
        period: Period,
        interval: Interval,
    ) -> Result<ChartResult> {
        let response = self
            .client
            .get(format!("{}/{}", BASE_URL, ticker))
            .header("User-Agent", USER_AGENT)
            .query(&[("range", period.as_str()), ("interval", interval.as_str())])
            .send()
            .await?;

        let body: ChartResponse = response.json().await?;

        if let Some(err) = body.chart.error {
            return Err(AppError::NoData(format!(
                "{}: {}",
                ticker,
                err.description.unwrap_or_else(|| err.code.unwrap_or_default())
            )));
        }

        body.chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| AppError::NoData(format!("{}: empty chart result", ticker)))
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn fetch_series(
        &self,
        ticker: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<Bar>> {
        let result = self.fetch_chart(ticker, period, interval).await?;
        Ok(result.into_bars())
    }

    async fn fetch_live_quote(&self, ticker: &str) -> Result<Option<LiveQuote>> {
        // Intraday bars for the current price, five daily bars for the
        // previous close baseline.
        let live = self
            .fetch_series(ticker, Period::OneDay, Interval::OneMinute)
            .await?;
        let history = self
            .fetch_series(ticker, Period::FiveDays, Interval::OneDay)
            .await?;

        let current_price = match live.last() {
            Some(bar) => bar.close,
            None => return Ok(None),
        };

        // Second-to-last daily close; with fewer than two bars the previous
        // close is unavailable, never zero.
        let previous_close = if history.len() > 1 {
            Some(history[history.len() - 2].close)
        } else {
            None
        };

        Ok(Some(LiveQuote {
            current_price,
            previous_close,
        }))
    }
}

// ============================================================================
// Chart API response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartOuter,
}

#[derive(Debug, Deserialize)]
struct ChartOuter {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "exchangeTimezoneName")]
    exchange_timezone_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBlock {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<i64>>>,
}

impl ChartResult {
    /// Convert the columnar chart payload into bars, dropping rows with any
    /// missing field and normalizing timestamps into the exchange timezone
    /// before storing them timezone-naive.
    fn into_bars(self) -> Vec<Bar> {
        let timestamps = self.timestamp.unwrap_or_default();
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();

        let opens = quote.open.unwrap_or_default();
        let highs = quote.high.unwrap_or_default();
        let lows = quote.low.unwrap_or_default();
        let closes = quote.close.unwrap_or_default();
        let volumes = quote.volume.unwrap_or_default();

        let tz: Option<Tz> = self
            .meta
            .exchange_timezone_name
            .as_deref()
            .and_then(|name| name.parse().ok());

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let row = (
                opens.get(i).copied().flatten(),
                highs.get(i).copied().flatten(),
                lows.get(i).copied().flatten(),
                closes.get(i).copied().flatten(),
                volumes.get(i).copied().flatten(),
            );
            if let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = row {
                bars.push(Bar {
                    timestamp: naive_exchange_time(ts, tz),
                    open,
                    high,
                    low,
                    close,
                    volume,
                });
            }
        }

        bars.sort_by_key(|b| b.timestamp);
        bars
    }
}

/// Epoch seconds to a timezone-naive timestamp in the exchange timezone
fn naive_exchange_time(epoch: i64, tz: Option<Tz>) -> NaiveDateTime {
    let utc = Utc
        .timestamp_opt(epoch, 0)
        .single()
        .unwrap_or_else(|| Utc.timestamp_opt(0, 0).unwrap());
    match tz {
        Some(tz) => utc.with_timezone(&tz).naive_local(),
        None => utc.naive_utc(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    #[test]
    fn test_into_bars_skips_null_rows() {
        let result = ChartResult {
            meta: ChartMeta {
                exchange_timezone_name: Some("America/New_York".to_string()),
            },
            timestamp: Some(vec![1_700_000_000, 1_700_086_400, 1_700_172_800]),
            indicators: ChartIndicators {
                quote: vec![QuoteBlock {
                    open: Some(vec![Some(1.0), None, Some(3.0)]),
                    high: Some(vec![Some(2.0), Some(2.5), Some(4.0)]),
                    low: Some(vec![Some(0.5), Some(1.5), Some(2.5)]),
                    close: Some(vec![Some(1.5), Some(2.0), Some(3.5)]),
                    volume: Some(vec![Some(100), Some(200), Some(300)]),
                }],
            },
        };

        let bars = result.into_bars();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 1.5);
        assert_eq!(bars[1].close, 3.5);
        assert!(bars[0].timestamp < bars[1].timestamp);
    }

    #[test]
    fn test_into_bars_empty_payload() {
        let result = ChartResult {
            meta: ChartMeta {
                exchange_timezone_name: None,
            },
            timestamp: None,
            indicators: ChartIndicators { quote: vec![] },
        };
        assert!(result.into_bars().is_empty());
    }

    #[test]
    fn test_naive_exchange_time_uses_exchange_offset() {
        // 2023-11-14 22:13:20 UTC is 17:13:20 in New York
        let naive = naive_exchange_time(1_700_000_000, Some(New_York));
        assert_eq!(naive.format("%H:%M:%S").to_string(), "17:13:20");
    }
}
