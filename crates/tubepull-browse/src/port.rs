//! Port trait implementations for `BrowseClient`.
//!
//! Maps internal `BrowseError` values onto the core port error types.

use async_trait::async_trait;
use tubepull_core::{
    BrowsePortError, BrowsePortResult, CollectionBrowserPort, CollectionId, ContinuationToken,
    DownloadError, DownloadResult, OpenedStream, Page, SelectedStream, VideoInfo, VideoSourcePort,
};

use crate::client::BrowseClient;
use crate::error::BrowseError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert an internal error into a browse port error.
///
/// Only a body that is not JSON at all counts as malformed; everything the
/// transport reports is a transport error.
fn map_browse_error(err: BrowseError) -> BrowsePortError {
    match err {
        BrowseError::JsonParse(e) => BrowsePortError::MalformedResponse {
            message: e.to_string(),
        },
        BrowseError::InvalidResponse { message } => BrowsePortError::MalformedResponse { message },
        other => BrowsePortError::Transport {
            status: other.status(),
            message: other.to_string(),
        },
    }
}

/// Convert an internal error into a per-item download error.
fn map_download_error(err: BrowseError) -> DownloadError {
    match err.status() {
        Some(status) => DownloadError::fetch_with_status(err.to_string(), status),
        None => DownloadError::fetch(err.to_string()),
    }
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> CollectionBrowserPort for BrowseClient<B> {
    async fn fetch_page(
        &self,
        collection_id: &CollectionId,
        token: &ContinuationToken,
    ) -> BrowsePortResult<Page> {
        self.browse_page(collection_id, token)
            .await
            .map_err(map_browse_error)
    }
}

#[async_trait]
impl<B: HttpBackend + Send + Sync> VideoSourcePort for BrowseClient<B> {
    async fn resolve_video(&self, url: &str) -> DownloadResult<VideoInfo> {
        self.player_lookup(url).await.map_err(map_download_error)
    }

    async fn open_stream(
        &self,
        _video: &VideoInfo,
        selected: &SelectedStream,
    ) -> DownloadResult<OpenedStream> {
        let (reader, expected_total) = self
            .open_candidate(&selected.stream)
            .await
            .map_err(map_download_error)?;
        Ok(OpenedStream {
            reader,
            expected_total,
        })
    }
}
