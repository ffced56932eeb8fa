//! News page commands

use crate::error::Result;
use crate::services::{NewsService, NewsView};

/// Build the News page placeholder view
#[tauri::command]
pub async fn get_news_view() -> Result<NewsView> {
    Ok(NewsService::build_view())
}
