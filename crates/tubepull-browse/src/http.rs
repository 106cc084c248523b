//! HTTP backend abstraction for the InnerTube API.
//!
//! The client is generic over [`HttpBackend`] so tests can swap in canned
//! responses. The production implementation uses reqwest.

use std::io;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use serde_json::Value;
use tokio_util::io::StreamReader;
use tracing::debug;
use tubepull_core::ByteReader;
use url::Url;

use crate::error::{BrowseError, BrowseResult};
use crate::models::EndpointConfig;
use crate::url::redact;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can post JSON and open byte streams.
///
/// This is an implementation detail - external code should use the port
/// traits.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST a JSON body and decode the JSON response.
    ///
    /// Non-success statuses fail with `ApiRequestFailed`; a body that is not
    /// JSON fails with `JsonParse`.
    async fn post_json(&self, url: &Url, body: &Value, user_agent: &str) -> BrowseResult<Value>;

    /// GET a URL and return its body as a reader plus the advertised length.
    async fn open_stream(
        &self,
        url: &Url,
        user_agent: &str,
    ) -> BrowseResult<(ByteReader, Option<u64>)>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// JSON requests use the configured timeout end to end. Stream requests
/// only bound the connect phase; the caller bounds each read.
pub struct ReqwestBackend {
    client: reqwest::Client,
    stream_client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &EndpointConfig) -> BrowseResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let stream_client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            stream_client,
        })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json(&self, url: &Url, body: &Value, user_agent: &str) -> BrowseResult<Value> {
        let response = self
            .client
            .post(url.as_str())
            .header(reqwest::header::USER_AGENT, user_agent)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowseError::ApiRequestFailed {
                status: status.as_u16(),
                url: redact(url),
            });
        }

        let bytes = response.bytes().await?;
        debug!(url = %redact(url), bytes = bytes.len(), "InnerTube response received");
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn open_stream(
        &self,
        url: &Url,
        user_agent: &str,
    ) -> BrowseResult<(ByteReader, Option<u64>)> {
        let response = self
            .stream_client
            .get(url.as_str())
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowseError::ApiRequestFailed {
                status: status.as_u16(),
                url: redact(url),
            });
        }

        let length = response.content_length();
        let body = Box::pin(response.bytes_stream().map_err(io::Error::other));
        let reader: ByteReader = Box::new(StreamReader::new(body));
        Ok((reader, length))
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
