pub mod http;

use std::path::Path;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The module was fetched and written to the destination.
    Downloaded,
    /// The target filename already exists; no request was made.
    AlreadyOwned,
}

/// Retrieves one module into the destination directory.
///
/// Implementations must be idempotent with respect to an already-owned
/// filename and must report the outcome so the caller can keep the
/// in-memory ownership state consistent.
#[async_trait]
pub trait Downloader {
    async fn download(&self, entry: &Entry, dest_dir: &Path) -> Result<DownloadOutcome>;
}
