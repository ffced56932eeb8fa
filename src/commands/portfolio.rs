//! Portfolio page commands

use crate::error::Result;
use crate::services::{PortfolioService, PortfolioView};
use crate::state::AppState;
use tauri::State;

/// Add a ticker to the tracked list (max 3, unique)
///
/// A duplicate or over-limit add is rejected with `INPUT_REJECTED` and
/// leaves the list unchanged.
#[tauri::command]
pub async fn add_tracked_ticker(
    state: State<'_, AppState>,
    ticker: String,
) -> Result<Vec<String>> {
    let tickers = state.add_tracked_ticker(&ticker)?;
    tracing::info!("Tracked tickers: {:?}", tickers);
    Ok(tickers)
}

/// Remove a ticker from the tracked list by value
#[tauri::command]
pub async fn remove_tracked_ticker(
    state: State<'_, AppState>,
    ticker: String,
) -> Result<Vec<String>> {
    state.remove_tracked_ticker(&ticker)
}

/// Get the tracked tickers in insertion order
#[tauri::command]
pub async fn get_tracked_tickers(state: State<'_, AppState>) -> Result<Vec<String>> {
    Ok(state.tracked_tickers())
}

/// Build the Portfolio page view
#[tauri::command]
pub async fn get_portfolio_view(state: State<'_, AppState>) -> Result<PortfolioView> {
    Ok(PortfolioService::build_view(&state).await)
}
