use std::io::Write;
use tracing::debug;

const MEGABYTE: f64 = 1_000_000.0;

/// Byte counters of one running download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadProgress {
    pub bytes_transferred: u64,
    /// `None` when the server sent no (or a zero) `Content-Length`.
    pub expected_total: Option<u64>,
}

impl DownloadProgress {
    pub fn new(expected_total: Option<u64>) -> Self {
        Self {
            bytes_transferred: 0,
            expected_total: expected_total.filter(|total| *total > 0),
        }
    }

    pub fn advance(&mut self, chunk_len: u64) {
        self.bytes_transferred += chunk_len;
    }

    pub fn fraction(&self) -> Option<f64> {
        self.expected_total
            .map(|total| self.bytes_transferred as f64 / total as f64)
    }

    /// `12.34 MB / 56.78 MB`, or just the numerator when the total is unknown.
    pub fn render(&self) -> String {
        let current = self.bytes_transferred as f64 / MEGABYTE;
        match self.expected_total {
            Some(total) => format!("{:.2} MB / {:.2} MB", current, total as f64 / MEGABYTE),
            None => format!("{:.2} MB", current),
        }
    }
}

/// Receives progress after every chunk written to disk.
pub trait ProgressObserver {
    fn on_progress(&mut self, chunk_len: usize, progress: &DownloadProgress);

    fn on_finish(&mut self, _progress: &DownloadProgress) {}
}

/// Discards all progress.
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _chunk_len: usize, _progress: &DownloadProgress) {}
}

/// Single-line progress, overwritten in place with `\r`.
pub struct TerminalProgress<W: Write> {
    out: W,
}

impl TerminalProgress<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressObserver for TerminalProgress<W> {
    fn on_progress(&mut self, _chunk_len: usize, progress: &DownloadProgress) {
        // A broken terminal must not abort the transfer.
        let _ = write!(self.out, "\r{}", progress.render());
        let _ = self.out.flush();
    }

    fn on_finish(&mut self, _progress: &DownloadProgress) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }
}

/// Emits progress as `debug` events instead of drawing to a terminal.
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn on_progress(&mut self, chunk_len: usize, progress: &DownloadProgress) {
        debug!(
            chunk = chunk_len,
            transferred = progress.bytes_transferred,
            total = ?progress.expected_total,
            "Download progress"
        );
    }
}
