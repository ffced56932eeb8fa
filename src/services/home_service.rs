//! Home Service
//!
//! Assembles the Home page view: live price metric, candlestick chart for
//! the selected range, latest-bar info strip, and the 60-day forecast
//! panel. Every failure path downgrades to an explicit unavailable state so
//! the refresh loop always reaches its next tick.

use crate::charts::{candlestick_figure, forecast_figure, Figure};
use crate::market::types::{Interval, Period};
use crate::services::forecast_service::ForecastService;
use crate::services::quote_service::{LiveQuoteView, QuoteService};
use crate::services::series_service::SeriesService;
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Latest-bar info strip below the candlestick chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarInfo {
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: i64,
}

/// Home page view model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeView {
    pub ticker: String,
    /// `None` renders the "no live data" warning
    pub quote: Option<LiveQuoteView>,
    /// `None` renders the "no data for ticker and interval" warning
    pub chart: Option<Figure>,
    pub info: Option<BarInfo>,
    pub forecast: Option<Figure>,
    /// Error banner text when the forecast failed this tick
    pub forecast_error: Option<String>,
}

/// Home service for view assembly
pub struct HomeService;

impl HomeService {
    /// Re-fetch everything the Home page depends on and rebuild its view
    pub async fn build_view(state: &AppState) -> HomeView {
        let ticker = state.home_ticker();
        let preset = state.chart_range();
        info!("HomeService::build_view - {} {}", ticker, preset.label());

        let quote = QuoteService::get_live_view(state, &ticker).await;

        let bars = SeriesService::get_preset_series(state, &ticker, preset).await;
        let chart = if bars.is_empty() {
            None
        } else {
            Some(candlestick_figure(&ticker, &bars))
        };
        let info = bars.last().map(|b| BarInfo {
            open: b.open,
            close: b.close,
            high: b.high,
            low: b.low,
            volume: b.volume,
        });

        // Forecast always runs on the two-year daily series, independent of
        // the selected chart range.
        let history =
            SeriesService::get_series(state, &ticker, Period::TwoYears, Interval::OneDay).await;
        let (forecast, forecast_error) =
            match ForecastService::forecast_closes(state, &history) {
                Ok(points) => (Some(forecast_figure(&ticker, &history, &points)), None),
                Err(e) => {
                    warn!("Forecast failed for {}: {}", ticker, e);
                    (None, Some(e.to_string()))
                }
            };

        HomeView {
            ticker,
            quote,
            chart,
            info,
            forecast,
            forecast_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::TrendForecaster;
    use crate::market::types::LiveQuote;
    use crate::services::testutil::{daily_bars, MockProvider};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_full_view_assembly() {
        let provider = MockProvider::default()
            .with_quote(
                "AAPL",
                LiveQuote {
                    current_price: 110.0,
                    previous_close: Some(100.0),
                },
            )
            .with_series(
                "AAPL",
                Period::TwoYears,
                Interval::OneDay,
                daily_bars(&[100.0, 102.0, 104.0, 106.0]),
            );
        let state =
            AppState::with_providers(Arc::new(provider), Arc::new(TrendForecaster::new()));

        let view = HomeService::build_view(&state).await;
        assert_eq!(view.ticker, "AAPL");

        let quote = view.quote.unwrap();
        assert_eq!(quote.current_price, 110.0);
        assert!(quote.change.is_some());

        // Default range is the two-year preset, so the chart and info strip
        // come from the same series the forecast uses.
        let info = view.info.unwrap();
        assert_eq!(info.close, 106.0);
        assert!(view.chart.is_some());
        assert!(view.forecast.is_some());
        assert!(view.forecast_error.is_none());
    }

    #[tokio::test]
    async fn test_unknown_ticker_renders_unavailable_states() {
        let state = AppState::with_providers(
            Arc::new(MockProvider::default().with_failure("AAPL")),
            Arc::new(TrendForecaster::new()),
        );

        let view = HomeService::build_view(&state).await;
        assert!(view.quote.is_none());
        assert!(view.chart.is_none());
        assert!(view.info.is_none());
        assert!(view.forecast.is_none());
        assert!(view.forecast_error.is_some());
    }

    #[tokio::test]
    async fn test_forecast_failure_keeps_rest_of_view() {
        // Two daily bars: enough for a chart, not enough for the model.
        let provider = MockProvider::default().with_series(
            "AAPL",
            Period::TwoYears,
            Interval::OneDay,
            daily_bars(&[100.0, 101.0]),
        );
        let state =
            AppState::with_providers(Arc::new(provider), Arc::new(TrendForecaster::new()));

        let view = HomeService::build_view(&state).await;
        assert!(view.chart.is_some());
        assert!(view.forecast.is_none());
        assert!(view.forecast_error.unwrap().contains("insufficient history"));
    }
}
