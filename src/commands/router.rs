//! Page routing commands

use crate::error::Result;
use crate::refresh::RefreshScheduler;
use crate::state::{AppState, Page};
use tauri::State;

/// Get the currently selected page
#[tauri::command]
pub async fn get_current_page(state: State<'_, AppState>) -> Result<Page> {
    Ok(state.current_page())
}

/// Select a page
///
/// Stores the selection and restarts the refresh loop for the new page;
/// the previous page's loop is cancelled first. The frontend clears the
/// content area on the selection change and re-renders from the next
/// `page-view` event.
#[tauri::command]
pub async fn select_page(
    state: State<'_, AppState>,
    scheduler: State<'_, RefreshScheduler>,
    page: Page,
) -> Result<Page> {
    if page != state.current_page() {
        tracing::info!("Switching page to {:?}", page);
        state.set_current_page(page);
    }
    scheduler.activate(page);
    Ok(page)
}
