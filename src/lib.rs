//! Stock Tracker Desktop - Live Market Dashboard
//!
//! A desktop application for tracking stock prices: live quotes with
//! candlestick charts, a 60-day price forecast, a small tracked portfolio,
//! and a holdings log with profit/loss metrics.

pub mod charts;
pub mod commands;
pub mod error;
pub mod forecast;
pub mod market;
pub mod refresh;
pub mod services;
pub mod state;

use refresh::RefreshScheduler;
use state::AppState;
use tauri::Manager;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize and run the Tauri application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stocktracker_desktop=debug,tauri=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Stock Tracker Desktop...");

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            // Session state lives for the lifetime of the app process
            app.manage(AppState::new());

            // Start the refresh loop on the default page
            let scheduler = RefreshScheduler::new(app.handle().clone());
            scheduler.activate(app.state::<AppState>().current_page());
            app.manage(scheduler);

            tracing::info!("Session state initialized, refresh loop started");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Router commands
            commands::router::get_current_page,
            commands::router::select_page,
            // Home commands
            commands::home::get_home_view,
            commands::home::set_home_ticker,
            commands::home::set_chart_range,
            commands::home::list_range_presets,
            commands::home::set_refresh_interval,
            commands::home::get_refresh_interval,
            // Portfolio commands
            commands::portfolio::add_tracked_ticker,
            commands::portfolio::remove_tracked_ticker,
            commands::portfolio::get_tracked_tickers,
            commands::portfolio::get_portfolio_view,
            // Profile commands
            commands::profile::add_holding,
            commands::profile::get_holdings,
            commands::profile::get_profile_view,
            // News commands
            commands::news::get_news_view,
            // Refresh commands
            commands::refresh::refresh_now,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
