//! News Service
//!
//! The News page never shipped in the original dashboard; the router keeps
//! the variant and this placeholder view so selecting it is not an error.

use serde::{Deserialize, Serialize};

/// News page view model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsView {
    pub headline: String,
}

/// News service for view assembly
pub struct NewsService;

impl NewsService {
    pub fn build_view() -> NewsView {
        NewsView {
            headline: "Market news is not available yet".to_string(),
        }
    }
}
