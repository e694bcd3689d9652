use crate::core::{RawMetadataResponse, VideoId};
use crate::error::{Error, Result};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://www.youtube.com/get_video_info";

/// Issues the `get_video_info` request and parses its URL-encoded body.
pub struct MetadataClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl MetadataClient {
    pub fn new(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn with_endpoint(endpoint: Url) -> Self {
        Self::new(reqwest::Client::new(), endpoint)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn request_url(&self, video_id: &VideoId) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("video_id", video_id.as_str());
        url
    }

    pub async fn fetch(&self, video_id: &VideoId) -> Result<RawMetadataResponse> {
        let url = self.request_url(video_id);
        info!("Fetching video info: {}", url);

        let network = |source: reqwest::Error| Error::Network {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(network)?;

        let body = response.text().await.map_err(network)?;
        debug!("Video info body: {} bytes", body.len());

        parse_response_body(&body)
    }
}

/// Builds the shared HTTP client. Only applies a timeout when one is given.
pub fn build_http_client(user_agent: &str, timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|source| Error::Network {
        url: String::new(),
        source,
    })
}

/// Parses an `application/x-www-form-urlencoded` body into a multimap.
///
/// Unlike a lenient form parser this rejects broken percent escapes and
/// non-UTF-8 values instead of passing them through.
pub fn parse_response_body(body: &str) -> Result<RawMetadataResponse> {
    let mut response = RawMetadataResponse::new();

    for pair in body.trim_end_matches(['\r', '\n']).split('&') {
        if pair.is_empty() {
            continue;
        }
        if pair.contains(';') {
            return Err(Error::MalformedResponse(format!(
                "unexpected ';' in pair `{}`",
                truncate(pair)
            )));
        }

        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        response.insert(decode_component(key)?, decode_component(value)?);
    }

    Ok(response)
}

fn decode_component(raw: &str) -> Result<String> {
    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(Error::MalformedResponse(format!(
                "invalid percent escape in `{}`",
                truncate(raw)
            )));
        }
    }

    let plus_decoded = raw.replace('+', " ");
    urlencoding::decode(&plus_decoded)
        .map(|s| s.into_owned())
        .map_err(|e| Error::MalformedResponse(e.to_string()))
}

fn truncate(s: &str) -> String {
    s.chars().take(40).collect()
}
