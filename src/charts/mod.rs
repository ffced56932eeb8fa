//! Renderable figure payloads
//!
//! Figures are Plotly-shaped JSON handed to the frontend for rendering.
//! Nothing flows back from the charting layer.

use crate::forecast::ForecastPoint;
use crate::market::types::Bar;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque renderable figure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis_title: Option<String>,
    pub xaxis_rangeslider_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub x: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub open: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub high: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub low: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub close: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

impl Trace {
    fn empty(kind: &str, name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.to_string(),
            x: vec![],
            y: vec![],
            open: vec![],
            high: vec![],
            low: vec![],
            close: vec![],
            labels: vec![],
            values: vec![],
            line: None,
        }
    }

    fn scatter(name: &str, x: Vec<String>, y: Vec<f64>, color: &str, dash: Option<&str>) -> Self {
        Self {
            x,
            y,
            line: Some(LineStyle {
                color: color.to_string(),
                dash: dash.map(|d| d.to_string()),
            }),
            ..Self::empty("scatter", name)
        }
    }
}

/// Candlestick chart for one ticker's OHLCV series
pub fn candlestick_figure(ticker: &str, bars: &[Bar]) -> Figure {
    let mut trace = Trace::empty("candlestick", "Candlesticks");
    trace.x = bars.iter().map(|b| b.timestamp.to_string()).collect();
    trace.open = bars.iter().map(|b| b.open).collect();
    trace.high = bars.iter().map(|b| b.high).collect();
    trace.low = bars.iter().map(|b| b.low).collect();
    trace.close = bars.iter().map(|b| b.close).collect();

    Figure {
        data: vec![trace],
        layout: Layout {
            title: format!("{} Stock Price", ticker),
            xaxis_title: Some("Date".to_string()),
            yaxis_title: Some("Price (USD)".to_string()),
            xaxis_rangeslider_visible: false,
        },
    }
}

/// Actual closes plus forecast line and dashed confidence band
pub fn forecast_figure(ticker: &str, bars: &[Bar], forecast: &[ForecastPoint]) -> Figure {
    let actual = Trace::scatter(
        "Actual Price",
        bars.iter().map(|b| b.timestamp.to_string()).collect(),
        bars.iter().map(|b| b.close).collect(),
        "blue",
        None,
    );

    let dates: Vec<String> = forecast.iter().map(|p| p.date.to_string()).collect();
    let yhat = Trace::scatter(
        "Forecast",
        dates.clone(),
        forecast.iter().map(|p| p.yhat).collect(),
        "green",
        None,
    );
    let lower = Trace::scatter(
        "Lower Confidence",
        dates.clone(),
        forecast.iter().map(|p| p.yhat_lower).collect(),
        "gray",
        Some("dash"),
    );
    let upper = Trace::scatter(
        "Upper Confidence",
        dates,
        forecast.iter().map(|p| p.yhat_upper).collect(),
        "gray",
        Some("dash"),
    );

    Figure {
        data: vec![actual, yhat, lower, upper],
        layout: Layout {
            title: format!("{} Stock Price Forecast (60 Days)", ticker),
            xaxis_title: Some("Date".to_string()),
            yaxis_title: Some("Price (USD)".to_string()),
            xaxis_rangeslider_visible: false,
        },
    }
}

/// One close-price line per tracked ticker
pub fn close_lines_figure(series: &BTreeMap<String, Vec<Bar>>) -> Figure {
    let data = series
        .iter()
        .map(|(ticker, bars)| {
            let mut trace = Trace::empty("scatter", ticker);
            trace.x = bars.iter().map(|b| b.timestamp.to_string()).collect();
            trace.y = bars.iter().map(|b| b.close).collect();
            trace
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            title: "Tracked Stocks".to_string(),
            xaxis_title: Some("Date".to_string()),
            yaxis_title: Some("Close (USD)".to_string()),
            xaxis_rangeslider_visible: false,
        },
    }
}

/// Pie chart of holding quantity shares
pub fn pie_figure(title: &str, shares: &BTreeMap<String, f64>) -> Figure {
    let mut trace = Trace::empty("pie", title);
    trace.labels = shares.keys().cloned().collect();
    trace.values = shares.values().copied().collect();

    Figure {
        data: vec![trace],
        layout: Layout {
            title: title.to_string(),
            xaxis_title: None,
            yaxis_title: None,
            xaxis_rangeslider_visible: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap(),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn test_candlestick_figure_shape() {
        let bars = vec![bar(1, 100.0), bar(2, 101.0)];
        let fig = candlestick_figure("AAPL", &bars);

        assert_eq!(fig.data.len(), 1);
        assert_eq!(fig.data[0].kind, "candlestick");
        assert_eq!(fig.data[0].close, vec![100.0, 101.0]);
        assert_eq!(fig.layout.title, "AAPL Stock Price");
        assert!(!fig.layout.xaxis_rangeslider_visible);
    }

    #[test]
    fn test_forecast_figure_has_four_traces() {
        let bars = vec![bar(1, 100.0), bar(2, 102.0)];
        let forecast = vec![ForecastPoint {
            date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            yhat: 104.0,
            yhat_lower: 101.0,
            yhat_upper: 107.0,
        }];

        let fig = forecast_figure("MSFT", &bars, &forecast);
        let names: Vec<&str> = fig.data.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Actual Price", "Forecast", "Lower Confidence", "Upper Confidence"]
        );
        assert_eq!(fig.data[2].line.as_ref().unwrap().dash.as_deref(), Some("dash"));
    }

    #[test]
    fn test_empty_vectors_omitted_from_json() {
        let fig = pie_figure("Stock Distribution", &BTreeMap::from([("AAPL".to_string(), 2.0)]));
        let json = serde_json::to_value(&fig).unwrap();
        let trace = &json["data"][0];
        assert!(trace.get("open").is_none());
        assert_eq!(trace["labels"][0], "AAPL");
    }
}
