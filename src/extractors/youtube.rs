use crate::core::{decoder, Extractor, MetadataClient, VideoId, VideoMetadata};
use crate::error::Result;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

pub const WATCH_URL: &str = "https://www.youtube.com/watch";

pub struct YouTubeExtractor {
    client: MetadataClient,
}

impl YouTubeExtractor {
    pub fn new(client: MetadataClient) -> Self {
        Self { client }
    }

    pub fn suitable(url: &Url) -> bool {
        matches!(url.host_str(), Some(host) if host == "youtu.be" || host == "youtube.com" || host.ends_with(".youtube.com"))
    }

    pub fn extract_video_id(url: &Url) -> Option<VideoId> {
        if !Self::suitable(url) {
            return None;
        }

        if url.host_str() == Some("youtu.be") {
            return url
                .path_segments()?
                .next()
                .filter(|s| !s.is_empty())
                .map(VideoId::new);
        }

        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, v)| VideoId::new(v.into_owned()))
    }

    /// Accepts a bare identifier or a watch URL.
    pub fn parse_video_input(input: &str) -> Option<VideoId> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        match Url::parse(input) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                Self::extract_video_id(&url)
            }
            _ => Some(VideoId::new(input)),
        }
    }

    pub fn watch_url(video_id: &VideoId) -> String {
        format!("{}?v={}", WATCH_URL, video_id)
    }
}

#[async_trait]
impl Extractor for YouTubeExtractor {
    fn name(&self) -> &'static str {
        "youtube"
    }

    async fn extract(&self, video_id: &VideoId) -> Result<VideoMetadata> {
        let raw = self.client.fetch(video_id).await?;
        debug!("Video info response has {} keys", raw.len());
        decoder::decode(&raw)
    }
}
