use crate::core::{Encoding, SelectedEncoding, VideoMetadata};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Best progressive (muxed video and audio) encoding.
    #[default]
    Video,
    /// Best audio-bearing adaptive encoding.
    Music,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => f.write_str("video"),
            Self::Music => f.write_str("music"),
        }
    }
}

/// Picks the encoding to download for `mode`.
///
/// Progressive and adaptive bitrates are not comparable, so each mode only
/// ranks within its own group.
pub fn select(metadata: &VideoMetadata, mode: SelectionMode) -> Result<SelectedEncoding> {
    let streaming = &metadata.streaming_data;
    let best = match mode {
        SelectionMode::Video => select_best(streaming.formats.iter()),
        SelectionMode::Music => select_best(
            streaming
                .adaptive_formats
                .iter()
                .filter(|e| e.is_audio_bearing()),
        ),
    };

    let best = best.ok_or(Error::NoFormatAvailable { mode })?;
    debug!(
        "Selected {} format itag={} bitrate={} ({})",
        mode, best.itag, best.bitrate, best.mime_type
    );

    Ok(SelectedEncoding::new(best.clone()))
}

/// Highest bitrate wins; on ties the earliest candidate is kept.
pub fn select_best<'a, I>(candidates: I) -> Option<&'a Encoding>
where
    I: IntoIterator<Item = &'a Encoding>,
{
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.bitrate <= current.bitrate => Some(current),
        _ => Some(candidate),
    })
}
