use crate::source::SourceError;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Follows a growing file, like `tail -F`.
///
/// Reading starts at the end of the file as it was when opened. When the file
/// shrinks below what has already been read it is assumed to have been
/// truncated and is read again from the start.
pub struct FileTail {
    path: PathBuf,
    reader: BufReader<File>,
    pos: u64,
    pending: Vec<u8>,
    poll_interval: Duration,
}

impl FileTail {
    pub async fn open(path: &Path) -> Result<Self, SourceError> {
        let mut file = File::open(path)
            .await
            .map_err(|e| SourceError::open(path, e))?;
        let pos = file
            .seek(SeekFrom::End(0))
            .await
            .map_err(|e| SourceError::open(path, e))?;

        tracing::debug!(path = %path.display(), offset = pos, "tailing file");

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            pos,
            pending: Vec::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next complete line without its line ending, as raw bytes.
    ///
    /// Decoding is left to the caller so one bad byte costs one line.
    pub async fn next_line(
        &mut self,
        shutdown: &CancellationToken,
    ) -> Result<Option<Vec<u8>>, SourceError> {
        loop {
            if shutdown.is_cancelled() {
                return Ok(None);
            }

            let read = self
                .reader
                .read_until(b'\n', &mut self.pending)
                .await
                .map_err(|e| SourceError::read(&self.path, e))?;
            self.pos += read as u64;

            if self.pending.ends_with(b"\n") {
                let mut line = std::mem::take(&mut self.pending);
                trim_line_ending(&mut line);
                return Ok(Some(line));
            }

            if read > 0 {
                // partial line; the writer has not finished it yet
                continue;
            }

            self.reopen_if_truncated().await?;

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => return Ok(None),
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }

    async fn reopen_if_truncated(&mut self) -> Result<(), SourceError> {
        let len = match fs::metadata(&self.path).await {
            Ok(meta) => meta.len(),
            Err(error) => {
                tracing::debug!(path = %self.path.display(), %error, "tailed file unavailable");
                return Ok(());
            }
        };

        if len >= self.pos {
            return Ok(());
        }

        tracing::info!(path = %self.path.display(), old_offset = self.pos, len, "file truncated, reading from start");

        let file = File::open(&self.path)
            .await
            .map_err(|e| SourceError::open(&self.path, e))?;
        self.reader = BufReader::new(file);
        self.pos = 0;
        self.pending.clear();
        Ok(())
    }
}

pub(crate) fn trim_line_ending(line: &mut Vec<u8>) {
    while matches!(line.last(), Some(b'\n' | b'\r')) {
        line.pop();
    }
}
