use crate::core::{RawMetadataResponse, SelectionMode};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The metadata or stream endpoint could not be reached, or answered
    /// with a non-success status.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("metadata response is not a valid key/value sequence: {0}")]
    MalformedResponse(String),

    /// The platform refused the request for this video (private, removed,
    /// region-blocked, ...). The raw response is kept for diagnostics.
    #[error("video info request reported status {}{}", status_label(.status), reason_label(.reason))]
    UpstreamStatus {
        status: Option<String>,
        reason: Option<String>,
        response: Box<RawMetadataResponse>,
    },

    #[error("failed to decode player response: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("no {mode} format available for this video")]
    NoFormatAvailable { mode: SelectionMode },

    #[error("cannot write {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stream broke off mid-download. The partial file stays on disk.
    #[error("transfer to {} failed after {transferred} bytes: {source}", .path.display())]
    Transfer {
        path: PathBuf,
        transferred: u64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }
}

fn status_label(status: &Option<String>) -> String {
    match status {
        Some(status) => format!("`{}`", status),
        None => "<missing>".to_string(),
    }
}

fn reason_label(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(": {}", r))
        .unwrap_or_default()
}
