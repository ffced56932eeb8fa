//! Series Service
//!
//! OHLCV retrieval with the empty-on-failure policy: upstream errors never
//! cross this boundary for normal page flow. Callers render an explicit
//! "no data" state for an empty series instead of crashing the loop.

use crate::market::types::{Bar, Interval, Period, RangePreset};
use crate::state::AppState;
use tracing::warn;

/// Series service for business logic
pub struct SeriesService;

impl SeriesService {
    /// Fetch an OHLCV series; an upstream failure is logged and surfaces
    /// as an empty series.
    pub async fn get_series(
        state: &AppState,
        ticker: &str,
        period: Period,
        interval: Interval,
    ) -> Vec<Bar> {
        match state.market.fetch_series(ticker, period, interval).await {
            Ok(bars) => bars,
            Err(e) => {
                warn!(
                    "Failed to fetch {} {}/{}: {}",
                    ticker,
                    period.as_str(),
                    interval.as_str(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Fetch the series for a chart range preset
    pub async fn get_preset_series(
        state: &AppState,
        ticker: &str,
        preset: RangePreset,
    ) -> Vec<Bar> {
        let (period, interval) = preset.period_interval();
        Self::get_series(state, ticker, period, interval).await
    }

    /// Latest close of a one-day series, used as a holding's current price
    pub async fn get_current_price(state: &AppState, ticker: &str) -> Option<f64> {
        let bars = Self::get_series(state, ticker, Period::OneDay, Interval::OneDay).await;
        bars.last().map(|b| b.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::TrendForecaster;
    use crate::services::testutil::{daily_bars, MockProvider};
    use std::sync::Arc;

    fn state_with(provider: MockProvider) -> AppState {
        AppState::with_providers(Arc::new(provider), Arc::new(TrendForecaster::new()))
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_empty_series() {
        let state = state_with(MockProvider::default().with_failure("AAPL"));
        let bars =
            SeriesService::get_series(&state, "AAPL", Period::OneMonth, Interval::OneDay).await;
        assert!(bars.is_empty());
    }

    #[tokio::test]
    async fn test_preset_series_uses_mapped_pair() {
        let provider = MockProvider::default().with_series(
            "AAPL",
            Period::SevenDays,
            Interval::FifteenMinutes,
            daily_bars(&[100.0, 101.0]),
        );
        let state = state_with(provider);

        let bars =
            SeriesService::get_preset_series(&state, "AAPL", RangePreset::OneWeekQuarterHour)
                .await;
        assert_eq!(bars.len(), 2);
    }

    #[tokio::test]
    async fn test_current_price_is_latest_close() {
        let provider = MockProvider::default().with_series(
            "AAPL",
            Period::OneDay,
            Interval::OneDay,
            daily_bars(&[100.0, 110.0]),
        );
        let state = state_with(provider);

        assert_eq!(
            SeriesService::get_current_price(&state, "AAPL").await,
            Some(110.0)
        );
        assert_eq!(SeriesService::get_current_price(&state, "MSFT").await, None);
    }
}
