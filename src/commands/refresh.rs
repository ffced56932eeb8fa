//! Manual refresh command

use crate::error::Result;
use crate::refresh::RefreshScheduler;
use tauri::State;

/// Run one refresh tick for the current page immediately
///
/// No-op while a tick for the same page is already in flight.
#[tauri::command]
pub async fn refresh_now(scheduler: State<'_, RefreshScheduler>) -> Result<()> {
    scheduler.refresh_now().await;
    Ok(())
}
