//! Profile page commands

use crate::error::Result;
use crate::services::{HoldingsService, ProfileView};
use crate::state::{AppState, Holding};
use chrono::NaiveDate;
use serde::Deserialize;
use tauri::State;

#[derive(Debug, Deserialize)]
pub struct AddHoldingRequest {
    pub name: String,
    pub purchase_price: f64,
    pub quantity: u32,
    pub purchase_date: NaiveDate,
}

/// Log a holding; holdings are append-only and never edited or removed
#[tauri::command]
pub async fn add_holding(
    state: State<'_, AppState>,
    request: AddHoldingRequest,
) -> Result<usize> {
    let count = state.add_holding(Holding {
        name: request.name.trim().to_uppercase(),
        purchase_price: request.purchase_price,
        quantity: request.quantity,
        purchase_date: request.purchase_date,
    })?;
    tracing::info!("Holding added, {} total", count);
    Ok(count)
}

/// Get all logged holdings
#[tauri::command]
pub async fn get_holdings(state: State<'_, AppState>) -> Result<Vec<Holding>> {
    Ok(state.holdings())
}

/// Build the Profile page view (rollup, totals, distribution)
#[tauri::command]
pub async fn get_profile_view(state: State<'_, AppState>) -> Result<ProfileView> {
    Ok(HoldingsService::build_view(&state).await)
}
