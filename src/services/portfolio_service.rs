//! Portfolio Service
//!
//! Summaries for the tracked-ticker list. A ticker whose fetch came back
//! empty is omitted from the summary and reported in `missing` so the page
//! can render a warning instead of zero-filled metrics.

use crate::charts::{close_lines_figure, Figure};
use crate::market::types::{Bar, Interval, Period};
use crate::services::series_service::SeriesService;
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Per-ticker display metrics over the fetched period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSummary {
    pub latest_close: f64,
    pub period_high: f64,
    pub period_low: f64,
    pub volume_sum: i64,
}

/// Portfolio page view model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioView {
    pub tickers: Vec<String>,
    pub summaries: BTreeMap<String, TickerSummary>,
    /// Tracked tickers whose fetch returned no data this tick
    pub missing: Vec<String>,
    pub chart: Option<Figure>,
}

/// Portfolio service for business logic
pub struct PortfolioService;

impl PortfolioService {
    /// Pure summary derivation; empty tables are omitted, never inserted
    /// with zeros.
    pub fn portfolio_summary(
        tables: &BTreeMap<String, Vec<Bar>>,
    ) -> BTreeMap<String, TickerSummary> {
        tables
            .iter()
            .filter_map(|(ticker, bars)| {
                let latest = bars.last()?;
                let period_high = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
                let period_low = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);
                let volume_sum = bars.iter().map(|b| b.volume).sum();
                Some((
                    ticker.clone(),
                    TickerSummary {
                        latest_close: latest.close,
                        period_high,
                        period_low,
                        volume_sum,
                    },
                ))
            })
            .collect()
    }

    /// Fetch one month of daily bars per tracked ticker and build the view
    pub async fn build_view(state: &AppState) -> PortfolioView {
        let tickers = state.tracked_tickers();
        info!("PortfolioService::build_view - {} tickers", tickers.len());

        let mut tables: BTreeMap<String, Vec<Bar>> = BTreeMap::new();
        for ticker in &tickers {
            let bars =
                SeriesService::get_series(state, ticker, Period::OneMonth, Interval::OneDay).await;
            tables.insert(ticker.clone(), bars);
        }

        let summaries = Self::portfolio_summary(&tables);
        let missing: Vec<String> = tickers
            .iter()
            .filter(|t| !summaries.contains_key(*t))
            .cloned()
            .collect();

        // Line chart over the tickers that actually have data
        tables.retain(|_, bars| !bars.is_empty());
        let chart = if tables.is_empty() {
            None
        } else {
            Some(close_lines_figure(&tables))
        };

        PortfolioView {
            tickers,
            summaries,
            missing,
            chart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::TrendForecaster;
    use crate::services::testutil::{daily_bars, MockProvider};
    use std::sync::Arc;

    #[test]
    fn test_summary_metrics() {
        let tables = BTreeMap::from([("AAPL".to_string(), daily_bars(&[100.0, 105.0, 102.0]))]);
        let summaries = PortfolioService::portfolio_summary(&tables);

        let s = &summaries["AAPL"];
        assert_eq!(s.latest_close, 102.0);
        assert_eq!(s.period_high, 106.0); // close + 1.0
        assert_eq!(s.period_low, 99.0); // close - 1.0
        assert_eq!(s.volume_sum, 1_000 + 1_001 + 1_002);
    }

    #[test]
    fn test_empty_table_omitted_entirely() {
        let tables = BTreeMap::from([
            ("AAPL".to_string(), daily_bars(&[100.0])),
            ("MSFT".to_string(), vec![]),
        ]);
        let summaries = PortfolioService::portfolio_summary(&tables);

        assert!(summaries.contains_key("AAPL"));
        assert!(!summaries.contains_key("MSFT"));
    }

    #[tokio::test]
    async fn test_build_view_reports_missing_tickers() {
        let provider = MockProvider::default()
            .with_series(
                "AAPL",
                Period::OneMonth,
                Interval::OneDay,
                daily_bars(&[100.0, 101.0]),
            )
            .with_failure("MSFT");
        let state =
            AppState::with_providers(Arc::new(provider), Arc::new(TrendForecaster::new()));
        state.add_tracked_ticker("AAPL").unwrap();
        state.add_tracked_ticker("MSFT").unwrap();

        let view = PortfolioService::build_view(&state).await;
        assert_eq!(view.tickers, vec!["AAPL", "MSFT"]);
        assert!(view.summaries.contains_key("AAPL"));
        assert_eq!(view.missing, vec!["MSFT"]);

        let chart = view.chart.unwrap();
        assert_eq!(chart.data.len(), 1);
        assert_eq!(chart.data[0].name, "AAPL");
    }

    #[tokio::test]
    async fn test_build_view_empty_portfolio() {
        let state = AppState::with_providers(
            Arc::new(MockProvider::default()),
            Arc::new(TrendForecaster::new()),
        );
        let view = PortfolioService::build_view(&state).await;
        assert!(view.tickers.is_empty());
        assert!(view.summaries.is_empty());
        assert!(view.chart.is_none());
    }
}
