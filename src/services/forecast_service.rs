//! Forecast Service
//!
//! Adapter in front of the forecasting model: normalizes a bar series into
//! the timezone-naive daily (date, close) shape the model expects, then
//! delegates. Failures are caught at the call site and rendered as an error
//! banner; the refresh loop continues on the next tick.

use crate::error::{AppError, Result};
use crate::forecast::ForecastPoint;
use crate::market::types::Bar;
use crate::state::AppState;
use chrono::NaiveDate;

/// Forecast horizon in calendar days
pub const FORECAST_HORIZON_DAYS: u32 = 60;

/// Forecast service for business logic
pub struct ForecastService;

impl ForecastService {
    /// Normalize bars to one (date, close) observation per day
    ///
    /// Bar timestamps are already timezone-naive; intraday bars collapse to
    /// the last close of each date.
    pub fn normalize(bars: &[Bar]) -> Vec<(NaiveDate, f64)> {
        let mut series: Vec<(NaiveDate, f64)> = Vec::with_capacity(bars.len());
        for bar in bars {
            let date = bar.timestamp.date();
            match series.last_mut() {
                Some((last_date, close)) if *last_date == date => *close = bar.close,
                _ => series.push((date, bar.close)),
            }
        }
        series
    }

    /// Forecast the next `FORECAST_HORIZON_DAYS` days from a bar series
    pub fn forecast_closes(state: &AppState, bars: &[Bar]) -> Result<Vec<ForecastPoint>> {
        let history = Self::normalize(bars);
        if history.is_empty() {
            return Err(AppError::Forecast(
                "no historical data to forecast from".to_string(),
            ));
        }
        state.forecaster.forecast(&history, FORECAST_HORIZON_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::TrendForecaster;
    use crate::services::testutil::{daily_bars, MockProvider};
    use chrono::NaiveDateTime;
    use std::sync::Arc;

    fn intraday_bar(ts: &str, close: f64) -> Bar {
        Bar {
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 10,
        }
    }

    #[test]
    fn test_normalize_collapses_intraday_to_last_close() {
        let bars = vec![
            intraday_bar("2024-01-02 09:30:00", 100.0),
            intraday_bar("2024-01-02 15:59:00", 101.5),
            intraday_bar("2024-01-03 09:30:00", 102.0),
        ];

        let series = ForecastService::normalize(&bars);
        assert_eq!(
            series,
            vec![
                (NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 101.5),
                (NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), 102.0),
            ]
        );
    }

    #[test]
    fn test_forecast_covers_horizon() {
        let state = AppState::with_providers(
            Arc::new(MockProvider::default()),
            Arc::new(TrendForecaster::new()),
        );
        let bars = daily_bars(&[100.0, 101.0, 102.0, 103.0, 104.0]);

        let points = ForecastService::forecast_closes(&state, &bars).unwrap();
        assert_eq!(points.len(), 5 + FORECAST_HORIZON_DAYS as usize);
    }

    #[test]
    fn test_empty_series_is_forecast_error() {
        let state = AppState::with_providers(
            Arc::new(MockProvider::default()),
            Arc::new(TrendForecaster::new()),
        );
        let err = ForecastService::forecast_closes(&state, &[]).unwrap_err();
        assert!(matches!(err, AppError::Forecast(_)));
    }
}
