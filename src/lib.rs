pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extractors;
pub mod utils;

pub use crate::core::{Downloader, Encoding, MetadataClient, Pipeline, SelectionMode, VideoId, VideoMetadata};
pub use error::{Error, Result};
pub use extractors::YouTubeExtractor;
