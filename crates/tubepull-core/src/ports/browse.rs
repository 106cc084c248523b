//! Collection browsing port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{CollectionId, ContinuationToken, Page};

/// Errors from collection browsing.
///
/// These abort the whole collection operation: a partial listing is never
/// reported as complete.
#[derive(Debug, Error)]
pub enum BrowsePortError {
    /// The request could not be sent or returned a non-success status.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the failure
        message: String,
        /// HTTP status, when one was received
        status: Option<u16>,
    },

    /// The response could not be understood.
    #[error("Malformed response: {message}")]
    MalformedResponse {
        /// What was wrong
        message: String,
    },
}

/// Result type alias for browse operations.
pub type BrowsePortResult<T> = Result<T, BrowsePortError>;

/// Port trait for walking a paginated collection.
///
/// One call is one request/response round-trip. The implementation decides
/// the request mode from the token: the empty token asks for the first page,
/// any other token asks for the continuation it names.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionBrowserPort: Send + Sync {
    /// Fetch one page of `collection_id`.
    async fn fetch_page(
        &self,
        collection_id: &CollectionId,
        token: &ContinuationToken,
    ) -> BrowsePortResult<Page>;
}
