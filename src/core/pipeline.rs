use crate::core::{
    selector, Downloader, DownloadProgress, Extractor, ProgressObserver, SelectedEncoding,
    SelectionMode, VideoId, VideoMetadata,
};
use crate::error::Result;
use crate::utils::output_filename;
use std::path::PathBuf;
use tracing::info;

/// Everything known about a video once a format has been chosen.
#[derive(Debug, Clone)]
pub struct PreparedDownload {
    pub video_id: VideoId,
    pub mode: SelectionMode,
    pub metadata: VideoMetadata,
    pub encoding: SelectedEncoding,
    pub destination: PathBuf,
}

/// Fetch, decode, select, download. Each step runs after the previous one
/// finished and any failure aborts the whole run.
pub struct Pipeline {
    extractor: Box<dyn Extractor>,
    downloader: Downloader,
    output_dir: PathBuf,
}

impl Pipeline {
    pub fn new(extractor: Box<dyn Extractor>, downloader: Downloader, output_dir: PathBuf) -> Self {
        Self {
            extractor,
            downloader,
            output_dir,
        }
    }

    pub async fn prepare(&self, video_id: &VideoId, mode: SelectionMode) -> Result<PreparedDownload> {
        info!("Extracting {} with {} extractor", video_id, self.extractor.name());
        let metadata = self.extractor.extract(video_id).await?;
        let encoding = selector::select(&metadata, mode)?;

        let filename = output_filename(metadata.title(), video_id.as_str(), &encoding.mime_type);
        let destination = self.output_dir.join(filename);

        Ok(PreparedDownload {
            video_id: video_id.clone(),
            mode,
            metadata,
            encoding,
            destination,
        })
    }

    pub async fn download(
        &self,
        prepared: &PreparedDownload,
        observer: &mut dyn ProgressObserver,
    ) -> Result<DownloadProgress> {
        self.downloader
            .download(&prepared.encoding.url, &prepared.destination, observer)
            .await
    }

    pub async fn run(
        &self,
        video_id: &VideoId,
        mode: SelectionMode,
        observer: &mut dyn ProgressObserver,
    ) -> Result<(PreparedDownload, DownloadProgress)> {
        let prepared = self.prepare(video_id, mode).await?;
        let progress = self.download(&prepared, observer).await?;
        Ok((prepared, progress))
    }
}
