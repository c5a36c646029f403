pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::config::FeedSource;

#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Load the raw feed body from its configured source.
///
/// A local path is read as feed content, which also covers running
/// against a downloaded copy of the feed.
pub async fn load_feed(source: &FeedSource, fetcher: &dyn Fetcher) -> Result<Vec<u8>> {
    match source {
        FeedSource::Remote(url) => fetcher.fetch(url).await,
        FeedSource::Local(path) => Ok(tokio::fs::read(path).await?),
    }
}
