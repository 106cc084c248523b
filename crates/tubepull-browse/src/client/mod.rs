//! InnerTube client for walking playlists and resolving videos.

mod pages;
mod player;

use crate::config::BrowseClientConfig;
use crate::error::BrowseResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::EndpointConfig;
use crate::url::resolve_config;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default InnerTube client using the reqwest HTTP backend.
pub type DefaultBrowseClient = BrowseClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the InnerTube `browse` and `player` endpoints.
///
/// Generic over the HTTP backend so tests can inject canned responses. Use
/// `DefaultBrowseClient::new()` outside of tests.
pub struct BrowseClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: EndpointConfig,
}

impl DefaultBrowseClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be
    /// built.
    pub fn new(config: &BrowseClientConfig) -> BrowseResult<Self> {
        let config = resolve_config(config)?;
        let backend = ReqwestBackend::new(&config)?;
        Ok(Self { backend, config })
    }

    /// Create a new client with default configuration.
    pub fn default_client() -> BrowseResult<Self> {
        Self::new(&BrowseClientConfig::default())
    }
}

impl<B: HttpBackend> BrowseClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: EndpointConfig, backend: B) -> Self {
        Self { backend, config }
    }
}
