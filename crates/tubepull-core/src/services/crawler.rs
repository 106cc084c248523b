//! Collection crawler.
//!
//! Drives a [`CollectionBrowserPort`] from the first page until the remote
//! side stops issuing continuation tokens, concatenating items in request
//! order.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Collection, CollectionId, ContinuationToken, Item};
use crate::ports::{BrowsePortError, BrowsePortResult, CollectionBrowserPort};

/// Walks every page of a collection.
pub struct CollectionCrawler {
    browser: Arc<dyn CollectionBrowserPort>,
}

impl CollectionCrawler {
    /// Create a crawler over the given browser.
    pub fn new(browser: Arc<dyn CollectionBrowserPort>) -> Self {
        Self { browser }
    }

    /// Fetch every item of a collection, in collection order.
    ///
    /// Errors from the browser are returned unchanged and abort the crawl.
    pub async fn fetch_all(&self, collection_id: &CollectionId) -> BrowsePortResult<Vec<Item>> {
        Ok(self.fetch_collection(collection_id).await?.items)
    }

    /// Fetch every item of a collection together with its title.
    ///
    /// The title is taken from the first page that reports one.
    ///
    /// # Errors
    ///
    /// Returns the browser's error for the first page that fails, or
    /// `MalformedResponse` if the remote side issues the same continuation
    /// token twice.
    pub async fn fetch_collection(
        &self,
        collection_id: &CollectionId,
    ) -> BrowsePortResult<Collection> {
        let mut items = Vec::new();
        let mut title: Option<String> = None;
        let mut token = ContinuationToken::first_page();
        let mut issued: HashSet<ContinuationToken> = HashSet::new();
        let mut pages = 0_usize;

        loop {
            let page = self.browser.fetch_page(collection_id, &token).await?;
            pages += 1;

            debug!(
                collection_id = %collection_id,
                page = pages,
                items = page.items.len(),
                last = page.is_last(),
                "Fetched collection page"
            );

            if title.is_none() {
                title = page.title;
            }
            items.extend(page.items);

            if page.next_token.is_empty() {
                break;
            }
            if !issued.insert(page.next_token.clone()) {
                return Err(BrowsePortError::MalformedResponse {
                    message: format!(
                        "continuation token repeated after page {pages} of collection '{collection_id}'"
                    ),
                });
            }
            token = page.next_token;
        }

        info!(
            collection_id = %collection_id,
            pages,
            items = items.len(),
            "Collection crawl complete"
        );

        Ok(Collection {
            id: collection_id.clone(),
            title: title.unwrap_or_default(),
            items,
        })
    }
}
