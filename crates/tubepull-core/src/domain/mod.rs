//! Domain model for collections, pages and media streams.

mod collection;
mod stream;

pub use collection::{Collection, CollectionId, ContinuationToken, Item, Page};
pub use stream::{CandidateStream, SelectedStream, VideoInfo};
