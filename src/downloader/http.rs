use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::app::{ModfetchError, Result};
use crate::domain::Entry;
use crate::downloader::{DownloadOutcome, Downloader};

pub struct HttpDownloader {
    client: Client,
    show_progress: bool,
}

impl HttpDownloader {
    pub fn new() -> Self {
        Self::with_progress(true)
    }

    /// No progress bars; required while the TUI owns the terminal.
    pub fn silent() -> Self {
        Self::with_progress(false)
    }

    fn with_progress(show_progress: bool) -> Self {
        let client = Client::builder()
            .user_agent("modfetch/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            show_progress,
        }
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, entry: &Entry, dest_dir: &Path) -> Result<DownloadOutcome> {
        let target = dest_dir.join(&entry.filename);
        if target.exists() {
            tracing::debug!(filename = %entry.filename, "target exists, skipping");
            return Ok(DownloadOutcome::AlreadyOwned);
        }

        tokio::fs::create_dir_all(dest_dir).await?;

        let response = self
            .client
            .get(&entry.download_url)
            .send()
            .await
            .map_err(|e| download_error(entry, &e))?;
        let response = response
            .error_for_status()
            .map_err(|e| download_error(entry, &e))?;

        // A failed transfer must not leave a partial file under the final
        // name, or the next run would classify it as owned.
        let result = stream_to_file(response, &target, self.show_progress).await;
        if result.is_err() {
            let _ = tokio::fs::remove_file(&target).await;
        }
        result?;

        Ok(DownloadOutcome::Downloaded)
    }
}

fn download_error(entry: &Entry, err: &dyn std::fmt::Display) -> ModfetchError {
    ModfetchError::Download(format!("{}: {}", entry.filename, err))
}

async fn stream_to_file(
    response: reqwest::Response,
    target: &Path,
    show_progress: bool,
) -> Result<()> {
    let progress = response.content_length().filter(|_| show_progress).map(|len| {
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    });

    let mut file = File::create(target).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|e| ModfetchError::Download(format!("stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(ref pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(())
}
