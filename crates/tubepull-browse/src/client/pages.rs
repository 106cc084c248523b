//! Playlist page fetching.

use tracing::debug;
use tubepull_core::{CollectionId, ContinuationToken, Page};

use crate::error::BrowseResult;
use crate::http::HttpBackend;
use crate::parsing::parse_browse_response;
use crate::url::build_browse_body;

use super::BrowseClient;

impl<B: HttpBackend> BrowseClient<B> {
    /// Fetch one page of a playlist.
    ///
    /// Exactly one request is made. The empty token fetches the first page.
    pub(crate) async fn browse_page(
        &self,
        collection_id: &CollectionId,
        token: &ContinuationToken,
    ) -> BrowseResult<Page> {
        let body = build_browse_body(&self.config, collection_id, token);
        let json = self
            .backend
            .post_json(
                &self.config.browse_url,
                &body,
                &self.config.web_client.user_agent,
            )
            .await?;

        let page = parse_browse_response(&json)?;
        debug!(
            collection_id = %collection_id,
            continuation = !token.is_empty(),
            items = page.items.len(),
            has_next = !page.is_last(),
            "Browse page parsed"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_config;
    use super::*;
    use crate::error::BrowseError;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use crate::parsing::fixtures::{continuation_page, first_page, video};

    #[tokio::test]
    async fn test_first_page_request() {
        let backend = FakeBackend::new().with_response(
            "VLPLtrip",
            CannedResponse::Json(first_page(
                "Road trip",
                &[video("aaaaaaaaaaa", "A")],
                Some("NEXT"),
            )),
        );
        let client = BrowseClient::with_backend(test_config(), backend.clone());

        let page = client
            .browse_page(&CollectionId::new("PLtrip"), &ContinuationToken::first_page())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next_token.as_str(), "NEXT");
        assert_eq!(page.title.as_deref(), Some("Road trip"));

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["browseId"], "VLPLtrip");
    }

    #[tokio::test]
    async fn test_continuation_request() {
        let backend = FakeBackend::new().with_response(
            "\"continuation\":\"NEXT\"",
            CannedResponse::Json(continuation_page(&[video("bbbbbbbbbbb", "B")], None)),
        );
        let client = BrowseClient::with_backend(test_config(), backend.clone());

        let page = client
            .browse_page(
                &CollectionId::new("PLtrip"),
                &ContinuationToken::from_remote("NEXT"),
            )
            .await
            .unwrap();

        assert_eq!(page.items[0].id, "bbbbbbbbbbb");
        assert!(page.is_last());
        assert!(backend.requests()[0].get("browseId").is_none());
    }

    #[tokio::test]
    async fn test_error_status_propagates() {
        let backend = FakeBackend::new().with_response("VLPLgone", CannedResponse::Status(500));
        let client = BrowseClient::with_backend(test_config(), backend);

        let result = client
            .browse_page(&CollectionId::new("PLgone"), &ContinuationToken::first_page())
            .await;

        assert!(matches!(
            result,
            Err(BrowseError::ApiRequestFailed { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let backend = FakeBackend::new()
            .with_response("VLPLhtml", CannedResponse::Raw("<html></html>".to_string()));
        let client = BrowseClient::with_backend(test_config(), backend);

        let result = client
            .browse_page(&CollectionId::new("PLhtml"), &ContinuationToken::first_page())
            .await;

        assert!(matches!(result, Err(BrowseError::JsonParse(_))));
    }

    #[tokio::test]
    async fn test_mistyped_page_fails_instead_of_ending_listing() {
        let mut json = first_page("Mix", &[video("aaaaaaaaaaa", "A")], Some("NEXT"));
        json["metadata"]["playlistMetadataRenderer"]["title"] = serde_json::json!(42);
        let backend = FakeBackend::new().with_response("VLPLodd", CannedResponse::Json(json));
        let client = BrowseClient::with_backend(test_config(), backend);

        let result = client
            .browse_page(&CollectionId::new("PLodd"), &ContinuationToken::first_page())
            .await;

        assert!(matches!(result, Err(BrowseError::InvalidResponse { .. })));
    }
}
