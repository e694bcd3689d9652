use clap::Parser;
use tracing::info;
use youtubedl::cli::Cli;
use youtubedl::Error;

#[tokio::main]
async fn main() {
    // Usage errors exit with status 2 from inside `parse`.
    let cli = Cli::parse();

    // Logs go to stderr so they do not break the progress line on stdout.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    info!("Starting youtubedl v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = cli.run().await {
        eprintln!("Error: {:#}", err);
        if let Some(Error::UpstreamStatus { response, .. }) = err.downcast_ref::<Error>() {
            eprintln!("{}", response);
        }
        std::process::exit(1);
    }
}
