//! Raw line input and the task that turns lines into hits.

mod tail;


pub use tail::FileTail;

use crate::event::Hit;
use crate::parse::{LogFormat, parse_line};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::thread;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Lines buffered between the reader thread and the source task.
const READER_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

pub enum LineSource {
    File(FileTail),
    /// Lines from a blocking reader running on its own thread.
    Reader(mpsc::Receiver<io::Result<Vec<u8>>>),
}

impl LineSource {
    /// Opens `path` for tailing, or stdin when `path` is `-`.
    pub async fn open(path: &Path) -> Result<Self, SourceError> {
        if path == Path::new(STDIN_PATH) {
            return Ok(Self::stdin());
        }
        Ok(Self::File(FileTail::open(path).await?))
    }

    pub fn stdin() -> Self {
        Self::from_reader(io::BufReader::new(io::stdin()))
    }

    /// Reads `reader` on a dedicated thread.
    ///
    /// A blocking read cannot be cancelled, so it is kept off the runtime:
    /// shutdown stops waiting on the channel and the thread is left to die
    /// with the process.
    pub fn from_reader<R>(mut reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(READER_CAPACITY);

        thread::spawn(move || {
            loop {
                let mut line = Vec::new();
                let next = match reader.read_until(b'\n', &mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        tail::trim_line_ending(&mut line);
                        Ok(line)
                    }
                    Err(error) => Err(error),
                };
                let failed = next.is_err();
                // receiver gone means the source task has stopped
                if tx.blocking_send(next).is_err() || failed {
                    break;
                }
            }
        });

        Self::Reader(rx)
    }

    /// Next complete line as raw bytes, or `None` once the input ends or
    /// `shutdown` fires.
    ///
    /// A tailed file never ends on its own; it waits for more data.
    pub async fn next_line(
        &mut self,
        shutdown: &CancellationToken,
    ) -> Result<Option<Vec<u8>>, SourceError> {
        match self {
            Self::File(tail) => tail.next_line(shutdown).await,
            Self::Reader(lines) => tokio::select! {
                biased;
                _ = shutdown.cancelled() => Ok(None),
                line = lines.recv() => line
                    .transpose()
                    .map_err(|e| SourceError::read(STDIN_PATH, e)),
            },
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceSummary {
    pub lines: u64,
    pub hits: u64,
    pub rejected: u64,
}

/// Reads lines until the source ends or `shutdown` fires, parsing each one and
/// sending the resulting hits to `events`.
///
/// Lines that are not UTF-8 or fail to parse are logged and skipped.
/// Returning drops `events`, which is how the rest of the pipeline learns that
/// input has ended.
pub async fn run_source(
    mut source: LineSource,
    format: LogFormat,
    events: mpsc::Sender<Hit>,
    shutdown: CancellationToken,
) -> Result<SourceSummary, SourceError> {
    let mut summary = SourceSummary::default();

    while let Some(raw) = source.next_line(&shutdown).await? {
        summary.lines += 1;
        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(error) => {
                summary.rejected += 1;
                let line = String::from_utf8_lossy(error.as_bytes());
                tracing::warn!(%error, %line, "skipping line that is not valid UTF-8");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let hit = match parse_line(format, &line) {
            Ok(hit) => hit,
            Err(error) => {
                summary.rejected += 1;
                tracing::warn!(%error, %line, "skipping unparsable line");
                continue;
            }
        };

        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            sent = events.send(hit) => {
                if sent.is_err() {
                    break;
                }
            }
        }
        summary.hits += 1;
    }

    tracing::debug!(
        lines = summary.lines,
        hits = summary.hits,
        rejected = summary.rejected,
        "line source stopped"
    );

    Ok(summary)
}
