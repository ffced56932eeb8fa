//! Forecasting model boundary

pub mod trend;

use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use trend::TrendForecaster;

/// One forecasted value with its confidence band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Contract over the external forecasting model
///
/// `history` is a timezone-naive daily series ordered by date ascending.
/// The result covers every historical date plus `horizon_days` future
/// calendar days.
pub trait Forecaster: Send + Sync {
    fn forecast(&self, history: &[(NaiveDate, f64)], horizon_days: u32)
        -> Result<Vec<ForecastPoint>>;
}
