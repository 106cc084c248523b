//! Port definitions.
//!
//! Traits the core uses to reach the outside world. Implementations live in
//! `tubepull-browse`; tests substitute fakes or `mockall` mocks.

mod browse;
mod download_events;
mod video_source;

pub use browse::{BrowsePortError, BrowsePortResult, CollectionBrowserPort};
pub use download_events::{DownloadEventEmitterPort, NoopDownloadEmitter};
pub use video_source::{ByteReader, OpenedStream, VideoSourcePort};

#[cfg(test)]
pub use browse::MockCollectionBrowserPort;
