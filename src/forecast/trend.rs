//! Least-squares trend forecaster

use crate::error::{AppError, Result};
use crate::forecast::{ForecastPoint, Forecaster};
use chrono::{Duration, NaiveDate};

/// Linear trend model with 95% prediction intervals
///
/// Fits ordinary least squares on (days since first observation, close) and
/// widens the band with distance from the sample mean, so far-future points
/// carry visibly more uncertainty.
pub struct TrendForecaster {
    /// Two-sided z value for the interval width
    z: f64,
}

impl TrendForecaster {
    pub fn new() -> Self {
        Self { z: 1.96 }
    }
}

impl Default for TrendForecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Forecaster for TrendForecaster {
    fn forecast(
        &self,
        history: &[(NaiveDate, f64)],
        horizon_days: u32,
    ) -> Result<Vec<ForecastPoint>> {
        if history.len() < 3 {
            return Err(AppError::Forecast(format!(
                "insufficient history: {} points, need at least 3",
                history.len()
            )));
        }

        let origin = history[0].0;
        let xs: Vec<f64> = history
            .iter()
            .map(|(d, _)| (*d - origin).num_days() as f64)
            .collect();
        let ys: Vec<f64> = history.iter().map(|(_, y)| *y).collect();

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let sxx: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();
        if sxx == 0.0 {
            return Err(AppError::Forecast(
                "degenerate time axis: all observations share one date".to_string(),
            ));
        }

        let sxy: f64 = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| (x - x_mean) * (y - y_mean))
            .sum();

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        // Residual standard error with two fitted parameters
        let sse: f64 = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
            .sum();
        let sigma = (sse / (n - 2.0)).sqrt();

        let last_date = history[history.len() - 1].0;
        let mut dates: Vec<NaiveDate> = history.iter().map(|(d, _)| *d).collect();
        for offset in 1..=horizon_days {
            dates.push(last_date + Duration::days(i64::from(offset)));
        }

        let points = dates
            .into_iter()
            .map(|date| {
                let x = (date - origin).num_days() as f64;
                let yhat = intercept + slope * x;
                let se = sigma * (1.0 + 1.0 / n + (x - x_mean).powi(2) / sxx).sqrt();
                ForecastPoint {
                    date,
                    yhat,
                    yhat_lower: yhat - self.z * se,
                    yhat_upper: yhat + self.z * se,
                }
            })
            .collect();

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
    }

    #[test]
    fn test_forecast_covers_history_plus_horizon() {
        let history: Vec<(NaiveDate, f64)> =
            (0..30).map(|i| (day(i), 100.0 + i as f64)).collect();

        let points = TrendForecaster::new().forecast(&history, 60).unwrap();
        assert_eq!(points.len(), 30 + 60);
        assert_eq!(points[0].date, day(0));
        assert_eq!(points.last().unwrap().date, day(29 + 60));
    }

    #[test]
    fn test_linear_series_recovered_exactly() {
        let history: Vec<(NaiveDate, f64)> =
            (0..10).map(|i| (day(i), 50.0 + 2.0 * i as f64)).collect();

        let points = TrendForecaster::new().forecast(&history, 5).unwrap();
        // Perfect fit: zero residual, bands collapse onto the estimate.
        let last = points.last().unwrap();
        assert!((last.yhat - (50.0 + 2.0 * 14.0)).abs() < 1e-9);
        assert!((last.yhat_upper - last.yhat).abs() < 1e-9);
        assert!((last.yhat - last.yhat_lower).abs() < 1e-9);
    }

    #[test]
    fn test_bands_widen_into_the_future() {
        let values = [100.0, 103.0, 99.0, 104.0, 101.0, 105.0, 100.0, 106.0];
        let history: Vec<(NaiveDate, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (day(i as i64), *v))
            .collect();

        let points = TrendForecaster::new().forecast(&history, 30).unwrap();
        let near = &points[values.len()];
        let far = points.last().unwrap();
        assert!(
            (far.yhat_upper - far.yhat_lower) > (near.yhat_upper - near.yhat_lower),
            "interval should widen with horizon"
        );
        assert!(near.yhat_lower < near.yhat && near.yhat < near.yhat_upper);
    }

    #[test]
    fn test_insufficient_history_rejected() {
        let history = vec![(day(0), 100.0), (day(1), 101.0)];
        let err = TrendForecaster::new().forecast(&history, 60).unwrap_err();
        assert!(matches!(err, AppError::Forecast(_)));
    }

    #[test]
    fn test_single_date_axis_rejected() {
        let history = vec![(day(0), 100.0), (day(0), 101.0), (day(0), 99.0)];
        let err = TrendForecaster::new().forecast(&history, 10).unwrap_err();
        assert!(matches!(err, AppError::Forecast(_)));
    }
}
