//! Market data provider boundary

pub mod types;
pub mod yahoo;

use crate::error::Result;
use async_trait::async_trait;
use types::{Bar, Interval, LiveQuote, Period};

/// Uniform contract over the external market-data service
///
/// `fetch_series` returns bars ordered by timestamp ascending. Upstream
/// failures surface as errors here; the service layer downgrades them to
/// empty results for page flow.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch an OHLCV series for a ticker
    async fn fetch_series(&self, ticker: &str, period: Period, interval: Interval)
        -> Result<Vec<Bar>>;

    /// Fetch the live price and previous close for a ticker
    ///
    /// Returns `Ok(None)` when no live bar exists for the ticker.
    async fn fetch_live_quote(&self, ticker: &str) -> Result<Option<LiveQuote>>;
}
