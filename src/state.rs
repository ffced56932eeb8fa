//! Application state management

use crate::error::{AppError, Result};
use crate::forecast::{Forecaster, TrendForecaster};
use crate::market::types::RangePreset;
use crate::market::yahoo::YahooProvider;
use crate::market::MarketDataProvider;
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Maximum tickers in the tracked portfolio list
pub const MAX_TRACKED_TICKERS: usize = 3;

/// Bounds for the live-tracking refresh interval slider
pub const MIN_REFRESH_SECS: u64 = 10;
pub const MAX_REFRESH_SECS: u64 = 300;
pub const DEFAULT_REFRESH_SECS: u64 = 60;

/// Fixed refresh interval for the holdings view
pub const HOLDINGS_REFRESH_SECS: u64 = 10;

/// Dashboard pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Home,
    Portfolio,
    Profile,
    News,
}

impl Default for Page {
    fn default() -> Self {
        Page::Home
    }
}

/// One user-entered holding; append-only, duplicates allowed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub name: String,
    pub purchase_price: f64,
    pub quantity: u32,
    pub purchase_date: NaiveDate,
}

/// Per-session mutable lists and page controls
///
/// Created on app start, dropped on exit; nothing here is persisted.
#[derive(Debug)]
pub struct SessionState {
    pub current_page: RwLock<Page>,
    pub tracked_tickers: RwLock<Vec<String>>,
    pub holdings: RwLock<Vec<Holding>>,
    pub home_ticker: RwLock<String>,
    pub chart_range: RwLock<RangePreset>,
    pub refresh_interval_secs: RwLock<u64>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_page: RwLock::new(Page::Home),
            tracked_tickers: RwLock::new(Vec::new()),
            holdings: RwLock::new(Vec::new()),
            home_ticker: RwLock::new("AAPL".to_string()),
            chart_range: RwLock::new(RangePreset::TwoYearsDaily),
            refresh_interval_secs: RwLock::new(DEFAULT_REFRESH_SECS),
        }
    }
}

/// Application state shared across all commands
pub struct AppState {
    /// Market-data provider boundary
    pub market: Arc<dyn MarketDataProvider>,

    /// Forecasting model boundary
    pub forecaster: Arc<dyn Forecaster>,

    /// Session-scoped user state
    pub session: SessionState,
}

impl AppState {
    /// Create new application state with the default providers
    pub fn new() -> Self {
        Self::with_providers(
            Arc::new(YahooProvider::new()),
            Arc::new(TrendForecaster::new()),
        )
    }

    /// Create state with explicit providers (used by tests)
    pub fn with_providers(
        market: Arc<dyn MarketDataProvider>,
        forecaster: Arc<dyn Forecaster>,
    ) -> Self {
        Self {
            market,
            forecaster,
            session: SessionState::default(),
        }
    }

    pub fn current_page(&self) -> Page {
        *self.session.current_page.read()
    }

    pub fn set_current_page(&self, page: Page) {
        *self.session.current_page.write() = page;
    }

    pub fn tracked_tickers(&self) -> Vec<String> {
        self.session.tracked_tickers.read().clone()
    }

    /// Append a ticker to the tracked list
    ///
    /// The symbol is uppercased. Duplicates and a fourth element are
    /// rejected without mutating the list.
    pub fn add_tracked_ticker(&self, ticker: &str) -> Result<Vec<String>> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(AppError::InputRejected("Ticker must not be empty".to_string()));
        }

        let mut tickers = self.session.tracked_tickers.write();
        if tickers.len() >= MAX_TRACKED_TICKERS {
            return Err(AppError::InputRejected(format!(
                "You can only track up to {} stocks",
                MAX_TRACKED_TICKERS
            )));
        }
        if tickers.contains(&ticker) {
            return Err(AppError::InputRejected(format!(
                "{} is already being tracked",
                ticker
            )));
        }

        tickers.push(ticker);
        Ok(tickers.clone())
    }

    /// Remove a ticker by value, preserving the order of the rest
    pub fn remove_tracked_ticker(&self, ticker: &str) -> Result<Vec<String>> {
        let ticker = ticker.trim().to_uppercase();
        let mut tickers = self.session.tracked_tickers.write();
        let before = tickers.len();
        tickers.retain(|t| t != &ticker);
        if tickers.len() == before {
            return Err(AppError::InputRejected(format!(
                "{} is not in the portfolio",
                ticker
            )));
        }
        Ok(tickers.clone())
    }

    pub fn holdings(&self) -> Vec<Holding> {
        self.session.holdings.read().clone()
    }

    /// Append a holding; holdings are never edited or removed
    pub fn add_holding(&self, holding: Holding) -> Result<usize> {
        if holding.name.trim().is_empty() {
            return Err(AppError::Validation("Stock name must not be empty".to_string()));
        }
        if holding.purchase_price <= 0.0 {
            return Err(AppError::Validation(
                "Purchase price must be positive".to_string(),
            ));
        }
        if holding.quantity == 0 {
            return Err(AppError::Validation("Quantity must be at least 1".to_string()));
        }

        let mut holdings = self.session.holdings.write();
        holdings.push(holding);
        Ok(holdings.len())
    }

    pub fn home_ticker(&self) -> String {
        self.session.home_ticker.read().clone()
    }

    pub fn set_home_ticker(&self, ticker: &str) -> Result<String> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(AppError::Validation("Ticker must not be empty".to_string()));
        }
        *self.session.home_ticker.write() = ticker.clone();
        Ok(ticker)
    }

    pub fn chart_range(&self) -> RangePreset {
        *self.session.chart_range.read()
    }

    pub fn set_chart_range(&self, preset: RangePreset) {
        *self.session.chart_range.write() = preset;
    }

    pub fn refresh_interval_secs(&self) -> u64 {
        *self.session.refresh_interval_secs.read()
    }

    pub fn set_refresh_interval_secs(&self, secs: u64) -> Result<u64> {
        if !(MIN_REFRESH_SECS..=MAX_REFRESH_SECS).contains(&secs) {
            return Err(AppError::Validation(format!(
                "Refresh interval must be between {} and {} seconds",
                MIN_REFRESH_SECS, MAX_REFRESH_SECS
            )));
        }
        *self.session.refresh_interval_secs.write() = secs;
        Ok(secs)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
