use crate::core::progress::{DownloadProgress, NoProgress, ProgressObserver, TerminalProgress};
use crate::error::{Error, Result};
use futures::StreamExt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::info;

pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Downloads `url` to `output_path`, drawing progress on stdout when
    /// `report_progress` is set.
    pub async fn download_with_progress(
        &self,
        url: &str,
        output_path: &Path,
        report_progress: bool,
    ) -> Result<DownloadProgress> {
        if report_progress {
            self.download(url, output_path, &mut TerminalProgress::stdout()).await
        } else {
            self.download(url, output_path, &mut NoProgress).await
        }
    }

    /// Streams `url` into `output_path` in a single pass.
    ///
    /// The destination is created (or truncated) before the request is sent.
    /// On a mid-stream failure the partial file is left on disk.
    pub async fn download(
        &self,
        url: &str,
        output_path: &Path,
        observer: &mut dyn ProgressObserver,
    ) -> Result<DownloadProgress> {
        let mut file = File::create(output_path)
            .await
            .map_err(|source| Error::FileSystem {
                path: output_path.to_path_buf(),
                source,
            })?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| Error::Network {
                url: url.to_string(),
                source,
            })?;

        let mut progress = DownloadProgress::new(response.content_length());
        info!(
            "Downloading {} bytes to {}",
            progress
                .expected_total
                .map_or("unknown".to_string(), |s| s.to_string()),
            output_path.display()
        );

        let transfer = |progress: &DownloadProgress, source: Box<dyn std::error::Error + Send + Sync>| {
            Error::Transfer {
                path: output_path.to_path_buf(),
                transferred: progress.bytes_transferred,
                source,
            }
        };

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| transfer(&progress, e.into()))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| transfer(&progress, e.into()))?;

            progress.advance(chunk.len() as u64);
            observer.on_progress(chunk.len(), &progress);
        }

        file.flush().await.map_err(|e| transfer(&progress, e.into()))?;
        observer.on_finish(&progress);

        info!(
            "Downloaded {} bytes to {}",
            progress.bytes_transferred,
            output_path.display()
        );

        Ok(progress)
    }
}
