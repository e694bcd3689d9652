//! Decoding of the `player_response` document embedded in the video info
//! response.
//!
//! The wire schema below mirrors the subset of the document this crate
//! consumes. Every struct carries `#[serde(default)]`: missing fields take
//! their zero value and unknown fields are ignored. The only structural
//! requirement is that `streamingData` and `microformat` are present.

use crate::core::{Encoding, Microformat, PlayabilityStatus, RawMetadataResponse, StreamingData, VideoMetadata};
use crate::core::metadata::lenient_u64;
use crate::error::{Error, Result};
use serde::Deserialize;
use tracing::{debug, warn};

pub const STATUS_KEY: &str = "status";
pub const STATUS_OK: &str = "ok";
pub const REASON_KEY: &str = "reason";
pub const PAYLOAD_KEY: &str = "player_response";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    streaming_data: Option<StreamingData>,
    microformat: Option<MicroformatContainer>,
    #[serde(default)]
    playability_status: PlayabilityStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MicroformatContainer {
    player_microformat_renderer: PlayerMicroformatRenderer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlayerMicroformatRenderer {
    title: SimpleText,
    description: SimpleText,
    #[serde(deserialize_with = "lenient_u64")]
    length_seconds: u64,
    owner_profile_url: String,
    #[serde(deserialize_with = "lenient_u64")]
    view_count: u64,
    publish_date: String,
    owner_channel_name: String,
    category: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimpleText {
    simple_text: String,
}

impl From<PlayerMicroformatRenderer> for Microformat {
    fn from(r: PlayerMicroformatRenderer) -> Self {
        Self {
            title: r.title.simple_text,
            description: r.description.simple_text,
            channel_name: r.owner_channel_name,
            channel_url: r.owner_profile_url,
            publish_date: r.publish_date,
            length_seconds: r.length_seconds,
            view_count: r.view_count,
            category: r.category,
        }
    }
}

/// Checks the response status, then decodes the embedded player response.
pub fn decode(raw: &RawMetadataResponse) -> Result<VideoMetadata> {
    let status = raw.get(STATUS_KEY);
    if status != Some(STATUS_OK) {
        return Err(Error::UpstreamStatus {
            status: status.map(str::to_string),
            reason: raw.get(REASON_KEY).map(str::to_string),
            response: Box::new(raw.clone()),
        });
    }

    let payload = raw
        .get(PAYLOAD_KEY)
        .ok_or_else(|| Error::decode(format!("`{}` field is missing", PAYLOAD_KEY)))?;

    parse_player_response(payload)
}

/// Parses the player response JSON. A value that is still percent-encoded
/// is decoded once more first.
pub fn parse_player_response(payload: &str) -> Result<VideoMetadata> {
    let trimmed = payload.trim_start();
    let document = if trimmed.starts_with('{') {
        std::borrow::Cow::Borrowed(trimmed)
    } else {
        debug!("Player response is still percent-encoded");
        urlencoding::decode(trimmed)
            .map_err(|e| Error::decode(format!("player response is not valid UTF-8: {}", e)))?
    };

    let response: PlayerResponse = serde_json::from_str(&document).map_err(|e| Error::Decode {
        message: e.to_string(),
        source: Some(e),
    })?;

    let streaming_data = response
        .streaming_data
        .ok_or_else(|| Error::decode("`streamingData` is missing"))?;
    let microformat = response
        .microformat
        .ok_or_else(|| Error::decode("`microformat` is missing"))?;

    if !response.playability_status.is_playable() {
        warn!(
            "Playability status is {}: {}",
            response.playability_status.status,
            response.playability_status.reason.as_deref().unwrap_or("no reason given")
        );
    }

    debug!(
        "Decoded {} progressive and {} adaptive formats",
        streaming_data.formats.len(),
        streaming_data.adaptive_formats.len()
    );

    Ok(VideoMetadata {
        streaming_data,
        microformat: microformat.player_microformat_renderer.into(),
        playability: response.playability_status,
    })
}

/// Encodings from both groups, progressive first.
pub fn all_encodings(metadata: &VideoMetadata) -> impl Iterator<Item = &Encoding> {
    metadata
        .streaming_data
        .formats
        .iter()
        .chain(metadata.streaming_data.adaptive_formats.iter())
}
