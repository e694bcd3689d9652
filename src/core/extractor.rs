use crate::core::{VideoId, VideoMetadata};
use crate::error::Result;
use async_trait::async_trait;

/// Source of decoded video metadata.
#[async_trait]
pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;
    async fn extract(&self, video_id: &VideoId) -> Result<VideoMetadata>;
}
