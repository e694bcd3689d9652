use crate::config::Config;
use crate::core::client::build_http_client;
use crate::core::{
    decoder, Downloader, Encoding, MetadataClient, NoProgress, Pipeline, PreparedDownload,
    ProgressObserver, SelectionMode, TerminalProgress, TracingProgress,
};
use crate::extractors::YouTubeExtractor;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "youtubedl")]
#[command(about = "Download the best available stream of a YouTube video")]
#[command(version)]
pub struct Cli {
    /// Video id or watch URL
    #[arg(value_name = "VIDEO")]
    pub video: String,

    /// Download as music (best audio stream)
    #[arg(short, long)]
    pub music: bool,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not draw the progress line
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    pub fn mode(&self) -> SelectionMode {
        if self.music {
            SelectionMode::Music
        } else {
            SelectionMode::Video
        }
    }

    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }

    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if self.quiet {
            config.show_progress = false;
        }
        Ok(config)
    }

    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        let video_id = YouTubeExtractor::parse_video_input(&self.video)
            .ok_or_else(|| anyhow::anyhow!("No video id found in `{}`", self.video))?;

        let http = build_http_client(&config.user_agent, config.timeout())?;
        let extractor = YouTubeExtractor::new(MetadataClient::new(http.clone(), config.endpoint_url()?));
        let pipeline = Pipeline::new(
            Box::new(extractor),
            Downloader::new(http),
            config.output_dir.clone(),
        );

        let prepared = pipeline.prepare(&video_id, self.mode()).await?;
        debug!(
            "{} formats available",
            decoder::all_encodings(&prepared.metadata).count()
        );

        print_summary(&prepared);
        println!();

        let mut observer: Box<dyn ProgressObserver> = if config.show_progress {
            Box::new(TerminalProgress::stdout())
        } else if self.verbose {
            Box::new(TracingProgress)
        } else {
            Box::new(NoProgress)
        };
        pipeline.download(&prepared, observer.as_mut()).await?;

        println!("completed!");

        Ok(())
    }
}

pub fn print_summary(prepared: &PreparedDownload) {
    let info = &prepared.metadata.microformat;
    let encoding: &Encoding = &prepared.encoding;

    println!("Channel: {} ({})", info.channel_name, info.channel_url);
    println!(
        "Title: {} ({})",
        info.title,
        YouTubeExtractor::watch_url(&prepared.video_id)
    );
    println!("Published: {}", info.publish_date);
    println!("Length: {}s", info.length_seconds);
    println!("View Count: {} views", info.view_count);
    println!("Mime Type: {}", encoding.mime_type);

    if prepared.mode == SelectionMode::Video {
        println!("Size: {}x{}", encoding.width, encoding.height);
        println!("Quality: {}", encoding.quality);
        println!("Bitrate: {} bps", encoding.bitrate);
    }

    println!("Output: {}", prepared.destination.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_video_only() {
        let cli = Cli::try_parse_from(["youtubedl", "dQw4w9WgXcQ"]).unwrap();
        assert_eq!(cli.video, "dQw4w9WgXcQ");
        assert_eq!(cli.mode(), SelectionMode::Video);
        assert_eq!(cli.log_level(), Level::INFO);
    }

    #[test]
    fn test_music_flag_before_or_after_id() {
        for args in [["youtubedl", "-m", "abc"], ["youtubedl", "abc", "-m"]] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(cli.video, "abc");
            assert_eq!(cli.mode(), SelectionMode::Music);
        }
    }

    #[test]
    fn test_usage_errors_exit_with_two() {
        let err = Cli::try_parse_from(["youtubedl"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);

        let err = Cli::try_parse_from(["youtubedl", "a", "b"]).err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["youtubedl", "-q", "-o", "/tmp/out", "abc"]).unwrap();
        let config = cli.load_config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert!(!config.show_progress);
        assert_eq!(cli.log_level(), Level::WARN);
    }
}
