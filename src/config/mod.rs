use crate::core::client::DEFAULT_ENDPOINT;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Metadata endpoint; the video id is appended as `video_id`.
    pub endpoint: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
    /// Request timeout in seconds. Unset means the HTTP client's default.
    pub timeout_secs: Option<u64>,
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_dir: PathBuf::from("."),
            user_agent: format!("youtubedl/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
            show_progress: true,
        }
    }
}

impl Config {
    /// Reads a TOML config file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                Self::from_toml(&text)
                    .with_context(|| format!("invalid config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        url::Url::parse(&config.endpoint)
            .with_context(|| format!("invalid endpoint `{}`", config.endpoint))?;
        Ok(config)
    }

    pub fn endpoint_url(&self) -> anyhow::Result<url::Url> {
        url::Url::parse(&self.endpoint).with_context(|| format!("invalid endpoint `{}`", self.endpoint))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
