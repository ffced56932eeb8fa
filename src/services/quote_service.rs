//! Quote Service
//!
//! Live price retrieval and the price-change view model. A missing current
//! price or previous close propagates as unavailable, never as zero.

use crate::state::AppState;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Direction of a price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

/// Derived price change, only constructible when both inputs exist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub delta: f64,
    pub percent: f64,
    pub direction: Direction,
    /// Metric delta coloring as shipped: "inverse" when the price rose.
    /// Kept bit-for-bit even though it flips the usual green-up convention.
    pub delta_color: String,
}

/// Live quote view model for the Home page metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveQuoteView {
    pub ticker: String,
    pub current_price: f64,
    pub previous_close: Option<f64>,
    pub change: Option<PriceChange>,
}

/// Quote service for business logic
pub struct QuoteService;

impl QuoteService {
    /// Pure price-change derivation
    ///
    /// Returns `None` when either input is absent or the baseline is zero;
    /// zero-filling here would corrupt the percent math downstream.
    pub fn price_change(current: Option<f64>, previous: Option<f64>) -> Option<PriceChange> {
        let (current, previous) = match (current, previous) {
            (Some(c), Some(p)) => (c, p),
            _ => return None,
        };
        if previous == 0.0 {
            return None;
        }

        let delta = current - previous;
        let direction = if delta > 0.0 {
            Direction::Up
        } else if delta < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        };

        Some(PriceChange {
            delta,
            percent: delta / previous * 100.0,
            direction,
            delta_color: if delta > 0.0 { "inverse" } else { "normal" }.to_string(),
        })
    }

    /// Fetch the live quote view for a ticker
    ///
    /// `None` means no live data; the page renders a warning and keeps
    /// looping.
    pub async fn get_live_view(state: &AppState, ticker: &str) -> Option<LiveQuoteView> {
        let quote = match state.market.fetch_live_quote(ticker).await {
            Ok(Some(quote)) => quote,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to fetch live quote for {}: {}", ticker, e);
                return None;
            }
        };

        Some(LiveQuoteView {
            ticker: ticker.to_string(),
            current_price: quote.current_price,
            previous_close: quote.previous_close,
            change: Self::price_change(Some(quote.current_price), quote.previous_close),
        })
    }
}
