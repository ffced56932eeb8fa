//! Home page commands

use crate::error::Result;
use crate::market::types::RangePreset;
use crate::services::{HomeService, HomeView};
use crate::state::AppState;
use serde::Serialize;
use tauri::State;

/// One entry of the chart range selector
#[derive(Debug, Serialize)]
pub struct RangePresetInfo {
    pub label: String,
    pub period: String,
    pub interval: String,
}

/// Build the Home page view for the current ticker and range
#[tauri::command]
pub async fn get_home_view(state: State<'_, AppState>) -> Result<HomeView> {
    Ok(HomeService::build_view(&state).await)
}

/// Set the ticker shown on the Home page
#[tauri::command]
pub async fn set_home_ticker(state: State<'_, AppState>, ticker: String) -> Result<String> {
    state.set_home_ticker(&ticker)
}

/// Set the candlestick chart range by its selector label
#[tauri::command]
pub async fn set_chart_range(state: State<'_, AppState>, label: String) -> Result<RangePreset> {
    let preset = RangePreset::from_label(&label)?;
    state.set_chart_range(preset);
    Ok(preset)
}

/// List the chart range presets for the selector
#[tauri::command]
pub async fn list_range_presets() -> Result<Vec<RangePresetInfo>> {
    Ok(RangePreset::ALL
        .iter()
        .map(|preset| {
            let (period, interval) = preset.period_interval();
            RangePresetInfo {
                label: preset.label().to_string(),
                period: period.as_str().to_string(),
                interval: interval.as_str().to_string(),
            }
        })
        .collect())
}

/// Set the live-tracking refresh interval (10-300 seconds)
#[tauri::command]
pub async fn set_refresh_interval(state: State<'_, AppState>, secs: u64) -> Result<u64> {
    state.set_refresh_interval_secs(secs)
}

/// Get the live-tracking refresh interval
#[tauri::command]
pub async fn get_refresh_interval(state: State<'_, AppState>) -> Result<u64> {
    Ok(state.refresh_interval_secs())
}
