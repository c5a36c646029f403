use std::sync::Arc;

use crate::config::{RunMode, Settings};
use crate::downloader::http::HttpDownloader;
use crate::downloader::Downloader;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;

/// Wires the run's settings to the HTTP collaborators.
pub struct AppContext {
    pub settings: Settings,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub downloader: Arc<dyn Downloader + Send + Sync>,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        // Progress bars would garble the alternate screen.
        let downloader = if settings.mode == RunMode::Interactive {
            HttpDownloader::silent()
        } else {
            HttpDownloader::new()
        };

        Self {
            settings,
            fetcher: Arc::new(HttpFetcher::new()),
            downloader: Arc::new(downloader),
        }
    }
}
