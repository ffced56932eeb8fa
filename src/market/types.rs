//! Common market data types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// One OHLCV bar, timezone-naive after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Live quote for a ticker
///
/// `previous_close` requires at least two completed daily bars; with fewer
/// it stays `None` and dependent percent-change math is suppressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveQuote {
    pub current_price: f64,
    pub previous_close: Option<f64>,
}

/// History lookback period accepted by the market-data service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::SevenDays => "7d",
            Period::OneMonth => "1mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
        }
    }
}

/// Bar interval accepted by the market-data service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::OneHour => "1h",
            Interval::OneDay => "1d",
        }
    }
}

/// The six chart range presets offered in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangePreset {
    TwoYearsDaily,
    OneYearDaily,
    OneMonthHourly,
    OneWeekQuarterHour,
    FiveDaysFiveMinute,
    OneDayMinute,
}

impl RangePreset {
    pub const ALL: [RangePreset; 6] = [
        RangePreset::TwoYearsDaily,
        RangePreset::OneYearDaily,
        RangePreset::OneMonthHourly,
        RangePreset::OneWeekQuarterHour,
        RangePreset::FiveDaysFiveMinute,
        RangePreset::OneDayMinute,
    ];

    /// Display label shown in the range selector
    pub fn label(&self) -> &'static str {
        match self {
            RangePreset::TwoYearsDaily => "2 Years (1d)",
            RangePreset::OneYearDaily => "1 Year (1d)",
            RangePreset::OneMonthHourly => "1 Month (1h)",
            RangePreset::OneWeekQuarterHour => "1 Week (15m)",
            RangePreset::FiveDaysFiveMinute => "5 Days (5m)",
            RangePreset::OneDayMinute => "1 Day (1m)",
        }
    }

    /// (period, interval) pair for the market-data request
    pub fn period_interval(&self) -> (Period, Interval) {
        match self {
            RangePreset::TwoYearsDaily => (Period::TwoYears, Interval::OneDay),
            RangePreset::OneYearDaily => (Period::OneYear, Interval::OneDay),
            RangePreset::OneMonthHourly => (Period::OneMonth, Interval::OneHour),
            RangePreset::OneWeekQuarterHour => (Period::SevenDays, Interval::FifteenMinutes),
            RangePreset::FiveDaysFiveMinute => (Period::FiveDays, Interval::FiveMinutes),
            RangePreset::OneDayMinute => (Period::OneDay, Interval::OneMinute),
        }
    }

    /// Resolve a preset from its display label
    pub fn from_label(label: &str) -> Result<RangePreset> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.label() == label)
            .ok_or_else(|| AppError::Validation(format!("Unknown range preset: {}", label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_label_mapping() {
        let cases = [
            ("2 Years (1d)", "2y", "1d"),
            ("1 Year (1d)", "1y", "1d"),
            ("1 Month (1h)", "1mo", "1h"),
            ("1 Week (15m)", "7d", "15m"),
            ("5 Days (5m)", "5d", "5m"),
            ("1 Day (1m)", "1d", "1m"),
        ];

        for (label, period, interval) in cases {
            let preset = RangePreset::from_label(label).unwrap();
            let (p, i) = preset.period_interval();
            assert_eq!(p.as_str(), period, "period for {}", label);
            assert_eq!(i.as_str(), interval, "interval for {}", label);
        }
    }

    #[test]
    fn test_preset_labels_unique() {
        for (idx, a) in RangePreset::ALL.iter().enumerate() {
            for b in &RangePreset::ALL[idx + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!(RangePreset::from_label("3 Weeks (2h)").is_err());
    }
}
