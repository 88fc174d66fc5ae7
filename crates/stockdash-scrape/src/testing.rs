//! In-memory [`PageSource`] for exercising the scrapers without a network.

use crate::client::PageSource;
use crate::error::{Result, ScrapeError};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Serves fixed HTML keyed by exact URL, and records every URL asked for.
///
/// Unknown URLs answer `404 Not Found`. Clones share the request log.
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    pages: HashMap<String, String>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StaticPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// URLs fetched so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

impl PageSource for StaticPages {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_string());
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            })
    }
}
