//! Page refresh scheduler
//!
//! One cancellable periodic task drives the active page: each tick
//! re-fetches the page's data, rebuilds its view model, and pushes it to
//! the frontend as a `page-view` event. Only one page's loop runs at a
//! time; switching pages cancels the previous loop before starting the
//! next. A per-page in-flight flag keeps refreshes single-flight so a slow
//! tick (or a manual refresh) never overlaps another for the same page.
//! A loop cancelled while its tick is still fetching discards that view
//! instead of emitting it over the newly selected page.

use crate::services::{HomeService, HoldingsService, NewsService, PortfolioService};
use crate::state::{AppState, Page, HOLDINGS_REFRESH_SECS};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tauri::{AppHandle, Emitter, Manager};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Event name carrying rebuilt page view models
pub const PAGE_VIEW_EVENT: &str = "page-view";

/// Rebuilt view model pushed to the frontend
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", content = "view")]
pub enum PagePayload {
    Home(crate::services::HomeView),
    Portfolio(crate::services::PortfolioView),
    Profile(crate::services::ProfileView),
    News(crate::services::NewsView),
}

/// Refresh scheduler owning the active page loop
pub struct RefreshScheduler {
    app_handle: AppHandle,
    /// Shutdown handle for the currently running loop
    active: Mutex<Option<watch::Sender<bool>>>,
    /// Busy/idle flags, one per page
    in_flight: Arc<DashMap<Page, ()>>,
}

impl RefreshScheduler {
    pub fn new(app_handle: AppHandle) -> Self {
        Self {
            app_handle,
            active: Mutex::new(None),
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Start the refresh loop for a page, cancelling any previous loop
    pub fn activate(&self, page: Page) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        if let Some(previous) = self.active.lock().replace(shutdown_tx) {
            let _ = previous.send(true);
        }

        info!("Activating refresh loop for {:?}", page);
        let app_handle = self.app_handle.clone();
        let in_flight = Arc::clone(&self.in_flight);
        tauri::async_runtime::spawn(async move {
            run_loop(app_handle, page, shutdown_rx, in_flight).await;
            debug!("Refresh loop for {:?} stopped", page);
        });
    }

    /// Stop the active loop, if any
    pub fn stop(&self) {
        if let Some(previous) = self.active.lock().take() {
            let _ = previous.send(true);
        }
    }

    /// Run one refresh tick for the current page immediately
    ///
    /// Shares the in-flight flag with the periodic loop, so a manual
    /// refresh during a running tick is a no-op.
    pub async fn refresh_now(&self) {
        let page = self.app_handle.state::<AppState>().current_page();
        tick(&self.app_handle, page, &self.in_flight, None).await;
    }
}

/// Seconds to wait between ticks; `None` for pages without a loop
fn interval_for(page: Page, state: &AppState) -> Option<u64> {
    match page {
        Page::Home | Page::Portfolio => Some(state.refresh_interval_secs()),
        Page::Profile => Some(HOLDINGS_REFRESH_SECS),
        Page::News => None,
    }
}

async fn run_loop(
    app_handle: AppHandle,
    page: Page,
    mut shutdown: watch::Receiver<bool>,
    in_flight: Arc<DashMap<Page, ()>>,
) {
    loop {
        tick(&app_handle, page, &in_flight, Some(&shutdown)).await;

        // Re-read each cycle so an interval change applies without a restart.
        let wait = match interval_for(page, &app_handle.state::<AppState>()) {
            Some(secs) => Duration::from_secs(secs),
            None => return,
        };

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    return;
                }
            }
        }
    }
}

/// Whether the loop owning a tick was cancelled while the tick ran
fn is_cancelled(shutdown: Option<&watch::Receiver<bool>>) -> bool {
    shutdown.map_or(false, |rx| *rx.borrow())
}

/// Rebuild and emit one page view; skipped when a tick for the same page
/// is still in flight.
async fn tick(
    app_handle: &AppHandle,
    page: Page,
    in_flight: &DashMap<Page, ()>,
    shutdown: Option<&watch::Receiver<bool>>,
) {
    if in_flight.insert(page, ()).is_some() {
        debug!("Skipping tick for {:?}: previous refresh still running", page);
        return;
    }

    let state = app_handle.state::<AppState>();
    let payload = match page {
        Page::Home => PagePayload::Home(HomeService::build_view(&state).await),
        Page::Portfolio => PagePayload::Portfolio(PortfolioService::build_view(&state).await),
        Page::Profile => PagePayload::Profile(HoldingsService::build_view(&state).await),
        Page::News => PagePayload::News(NewsService::build_view()),
    };

    // A page switch can cancel this loop while the fetches above are still
    // awaiting the network; that view must not land on the new page.
    if is_cancelled(shutdown) {
        debug!("Discarding view for {:?}: loop cancelled mid-tick", page);
    } else if let Err(e) = app_handle.emit(PAGE_VIEW_EVENT, &payload) {
        warn!("Failed to emit page view for {:?}: {}", page, e);
    }

    in_flight.remove(&page);
}
