//! Video metadata and stream port.

use std::fmt;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::domain::{SelectedStream, VideoInfo};
use crate::download::DownloadResult;

/// Readable byte stream of a media payload.
pub type ByteReader = Box<dyn AsyncRead + Send + Unpin>;

/// An opened media stream.
pub struct OpenedStream {
    /// The payload.
    pub reader: ByteReader,
    /// Size the remote side advertised, 0 when unknown.
    pub expected_total: u64,
}

impl fmt::Debug for OpenedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenedStream")
            .field("expected_total", &self.expected_total)
            .finish_non_exhaustive()
    }
}

/// Port trait for resolving videos and opening their streams.
///
/// All failures surface as `DownloadError::Fetch` so the dispatcher can
/// isolate them per item.
#[async_trait]
pub trait VideoSourcePort: Send + Sync {
    /// Resolve a watch URL (or bare video id) into metadata and candidates.
    async fn resolve_video(&self, url: &str) -> DownloadResult<VideoInfo>;

    /// Open the byte stream of the selected candidate.
    async fn open_stream(
        &self,
        video: &VideoInfo,
        selected: &SelectedStream,
    ) -> DownloadResult<OpenedStream>;
}
