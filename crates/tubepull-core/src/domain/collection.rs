//! Collection, page and item types.
//!
//! A collection is walked page by page. Each page carries the items it lists
//! and the opaque token for the page after it. Tokens are issued by the
//! remote side and round-tripped verbatim; the empty token means "first page"
//! on a request and "no more pages" on a response.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a remote collection (the `list=` value of a playlist URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    /// Wrap a caller-supplied collection identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque continuation cursor.
///
/// The only locally constructed token is [`ContinuationToken::first_page`];
/// every other value comes from a response via [`ContinuationToken::from_remote`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// The sentinel that requests the first page of a collection.
    pub const fn first_page() -> Self {
        Self(String::new())
    }

    /// Wrap a token exactly as the remote side issued it.
    pub fn from_remote(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Whether this is the empty sentinel.
    ///
    /// On a request this selects the first page; on a response it marks the
    /// end of the collection.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single collection entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Remote identifier. Empty marks an unavailable entry.
    pub id: String,
    /// Display title, used for output naming. May be empty.
    pub title: String,
}

impl Item {
    /// Create an item.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Whether the item can be downloaded at all.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// One page of a collection listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Items in the order the remote side listed them.
    pub items: Vec<Item>,
    /// Token for the next page; empty when this is the last page.
    pub next_token: ContinuationToken,
    /// Collection title, when the page shape carries one (first pages only).
    pub title: Option<String>,
}

impl Page {
    /// A page with no items and no continuation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no further page follows this one.
    pub fn is_last(&self) -> bool {
        self.next_token.is_empty()
    }
}

/// A fully crawled collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// The collection identifier that was crawled.
    pub id: CollectionId,
    /// Title reported by the first page, empty if none was present.
    pub title: String,
    /// All items, concatenated in request order.
    pub items: Vec<Item>,
}
