use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::Deref;

/// Opaque identifier of a video, as used by the metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key/value multimap returned by the metadata endpoint, in body order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMetadataResponse {
    pairs: Vec<(String, String)>,
}

impl RawMetadataResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawMetadataResponse {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for RawMetadataResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_VALUE: usize = 200;

        for (key, value) in self.iter() {
            if value.chars().count() > MAX_VALUE {
                let head: String = value.chars().take(MAX_VALUE).collect();
                writeln!(f, "{}: {}... ({} bytes)", key, head, value.len())?;
            } else {
                writeln!(f, "{}: {}", key, value)?;
            }
        }
        Ok(())
    }
}

/// Decoded metadata of a single video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub streaming_data: StreamingData,
    pub microformat: Microformat,
    pub playability: PlayabilityStatus,
}

impl VideoMetadata {
    pub fn title(&self) -> &str {
        &self.microformat.title
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamingData {
    /// Progressive encodings: video and audio muxed together.
    pub formats: Vec<Encoding>,
    /// Adaptive encodings: video-only or audio-only.
    pub adaptive_formats: Vec<Encoding>,
}

impl StreamingData {
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty() && self.adaptive_formats.is_empty()
    }

    pub fn len(&self) -> usize {
        self.formats.len() + self.adaptive_formats.len()
    }
}

/// Descriptive fields of a video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Microformat {
    pub title: String,
    pub description: String,
    pub channel_name: String,
    pub channel_url: String,
    pub publish_date: String,
    pub length_seconds: u64,
    pub view_count: u64,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayabilityStatus {
    pub status: String,
    pub reason: Option<String>,
}

impl PlayabilityStatus {
    /// Treats a missing status as playable; older responses omit it.
    pub fn is_playable(&self) -> bool {
        self.status.is_empty() || self.status.eq_ignore_ascii_case("ok")
    }
}

/// One offered stream variant.
///
/// Every field falls back to its zero value when absent from the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Encoding {
    pub itag: u32,
    pub url: String,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    pub quality: String,
    pub quality_label: Option<String>,
    #[serde(deserialize_with = "lenient_u64")]
    pub bitrate: u64,
    #[serde(deserialize_with = "lenient_opt_u64")]
    pub average_bitrate: Option<u64>,
    pub fps: Option<u32>,
    /// Present only on audio-bearing adaptive encodings.
    pub audio_quality: Option<String>,
    #[serde(deserialize_with = "lenient_opt_u64")]
    pub content_length: Option<u64>,
}

impl Encoding {
    pub fn is_audio_bearing(&self) -> bool {
        self.audio_quality
            .as_deref()
            .is_some_and(|q| !q.is_empty())
    }

    pub fn extension(&self) -> &str {
        crate::utils::extract_extension(&self.mime_type)
    }

    pub fn resolution(&self) -> Option<String> {
        if self.width > 0 && self.height > 0 {
            Some(format!("{}x{}", self.width, self.height))
        } else {
            None
        }
    }
}

/// The encoding chosen for download.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedEncoding(Encoding);

impl SelectedEncoding {
    pub(crate) fn new(encoding: Encoding) -> Self {
        Self(encoding)
    }

    pub fn into_inner(self) -> Encoding {
        self.0
    }
}

impl Deref for SelectedEncoding {
    type Target = Encoding;

    fn deref(&self) -> &Encoding {
        &self.0
    }
}

// The platform sends several counters as strings ("lengthSeconds": "212")
// and others as numbers. Anything unparseable counts as zero.
fn number_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value).unwrap_or(0))
}

pub(crate) fn lenient_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}
