//! Per-item fetch-and-write.
//!
//! The pool hands each worker a [`DownloadTask`]; an [`ItemFetcher`] turns it
//! into a file on disk. [`StreamFetcher`] is the production implementation:
//! resolve the video, pick a progressive stream, copy it to a per-item `.part` file
//! under a per-read stall deadline, then rename into place.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, warn};
use tubepull_browse::watch_url;
use tubepull_core::{
    DownloadError, DownloadEvent, DownloadEventEmitterPort, DownloadResult, DownloadTask,
    NoopDownloadEmitter, OpenedStream, VideoSourcePort,
};

use crate::format_selector::select_best;
use crate::paths::part_path;
use crate::progress::ProgressThrottle;

/// Read buffer size.
const CHUNK_SIZE: usize = 64 * 1024;

/// Fetches one item and writes it to its destination.
#[async_trait]
pub trait ItemFetcher: Send + Sync {
    /// Download `task.item` to `task.destination`, returning the bytes written.
    ///
    /// Fails with `NoEligibleFormat`, `Fetch` or `Write`. On failure nothing
    /// is left at the destination.
    async fn fetch(&self, task: &DownloadTask) -> DownloadResult<u64>;
}

/// Fetcher backed by a [`VideoSourcePort`].
pub struct StreamFetcher {
    source: Arc<dyn VideoSourcePort>,
    emitter: Arc<dyn DownloadEventEmitterPort>,
    idle_timeout: Duration,
}

impl StreamFetcher {
    /// Create a fetcher; each stream read may stall for at most `idle_timeout`.
    pub fn new(source: Arc<dyn VideoSourcePort>, idle_timeout: Duration) -> Self {
        Self {
            source,
            emitter: Arc::new(NoopDownloadEmitter::new()),
            idle_timeout,
        }
    }

    /// Report byte progress through `emitter`.
    #[must_use]
    pub fn with_emitter(mut self, emitter: Arc<dyn DownloadEventEmitterPort>) -> Self {
        self.emitter = emitter;
        self
    }

    /// Write the stream to `part` and rename it to the destination.
    async fn place(
        &self,
        task: &DownloadTask,
        part: &Path,
        opened: OpenedStream,
    ) -> DownloadResult<u64> {
        if let Some(parent) = task.destination.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DownloadError::write(parent, &e))?;
        }

        let written = self.copy_stream(task, part, opened).await?;

        fs::rename(part, &task.destination)
            .await
            .map_err(|e| DownloadError::write(&task.destination, &e))?;
        Ok(written)
    }

    async fn copy_stream(
        &self,
        task: &DownloadTask,
        part: &Path,
        opened: OpenedStream,
    ) -> DownloadResult<u64> {
        let expected = opened.expected_total;
        let mut reader = opened.reader;
        let mut file = fs::File::create(part)
            .await
            .map_err(|e| DownloadError::write(part, &e))?;

        let mut buf = vec![0_u8; CHUNK_SIZE];
        let mut written = 0_u64;
        let mut throttle = ProgressThrottle::default();

        loop {
            let n = match tokio::time::timeout(self.idle_timeout, reader.read(&mut buf)).await {
                Ok(Ok(n)) => n,
                Ok(Err(e)) => {
                    return Err(DownloadError::fetch(format!(
                        "stream read failed after {written} bytes: {e}"
                    )));
                }
                Err(_) => {
                    return Err(DownloadError::fetch(format!(
                        "stream stalled for {}s after {written} bytes",
                        self.idle_timeout.as_secs()
                    )));
                }
            };
            if n == 0 {
                break;
            }

            file.write_all(&buf[..n])
                .await
                .map_err(|e| DownloadError::write(part, &e))?;
            written += n as u64;

            if throttle.should_emit() {
                self.emitter
                    .emit(DownloadEvent::progress(&task.item.id, written, expected));
            }
        }

        file.flush()
            .await
            .map_err(|e| DownloadError::write(part, &e))?;
        self.emitter
            .emit(DownloadEvent::progress(&task.item.id, written, expected));

        if expected > 0 && written != expected {
            warn!(
                item_id = %task.item.id,
                expected,
                written,
                "Stream size differs from advertised length"
            );
        }
        Ok(written)
    }
}

#[async_trait]
impl ItemFetcher for StreamFetcher {
    async fn fetch(&self, task: &DownloadTask) -> DownloadResult<u64> {
        let video = self.source.resolve_video(&watch_url(&task.item.id)).await?;
        let selected =
            select_best(&video.candidates).map_err(|e| e.into_download_error(&task.item.id))?;
        debug!(
            item_id = %task.item.id,
            itag = selected.stream.itag,
            quality = %selected.stream.quality_label,
            "Selected stream"
        );

        let opened = self.source.open_stream(&video, &selected).await?;
        let part = part_path(&task.destination, &task.item.id);
        let result = self.place(task, &part, opened).await;
        if result.is_err() {
            // Best effort: the part file may not exist yet.
            let _ = fs::remove_file(&part).await;
        }
        result
    }
}
