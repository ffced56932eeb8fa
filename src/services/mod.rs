//! Services Layer
//!
//! Business logic shared between the Tauri IPC commands and the refresh
//! scheduler. Commands and refresh ticks both build page view models here.
//!
//! # Services
//!
//! - `SeriesService` - OHLCV fetches with the empty-on-failure policy
//! - `QuoteService` - Live quotes and price-change math
//! - `PortfolioService` - Tracked-ticker summaries and line chart
//! - `HoldingsService` - Holdings rollup, totals and distribution shares
//! - `ForecastService` - Series normalization and the forecast adapter
//! - `HomeService` - Home page view assembly

pub mod forecast_service;
pub mod holdings_service;
pub mod home_service;
pub mod news_service;
pub mod portfolio_service;
pub mod quote_service;
pub mod series_service;

// Re-export commonly used types and services
pub use forecast_service::ForecastService;
pub use holdings_service::{HoldingView, HoldingsRollup, HoldingsService, ProfileView, RollupTotals};
pub use home_service::{BarInfo, HomeService, HomeView};
pub use news_service::{NewsService, NewsView};
pub use portfolio_service::{PortfolioService, PortfolioView, TickerSummary};
pub use quote_service::{Direction, LiveQuoteView, PriceChange, QuoteService};
pub use series_service::SeriesService;
