pub mod client;
pub mod decoder;
pub mod downloader;
pub mod extractor;
pub mod metadata;
pub mod pipeline;
pub mod progress;
pub mod selector;

pub use client::MetadataClient;
pub use downloader::Downloader;
pub use extractor::Extractor;
pub use metadata::{
    Encoding, Microformat, PlayabilityStatus, RawMetadataResponse, SelectedEncoding,
    StreamingData, VideoId, VideoMetadata,
};
pub use pipeline::{Pipeline, PreparedDownload};
pub use progress::{DownloadProgress, NoProgress, ProgressObserver, TerminalProgress, TracingProgress};
pub use selector::SelectionMode;
