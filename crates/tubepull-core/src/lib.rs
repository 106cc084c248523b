//! Core domain types and ports for tubepull.
//!
//! This crate owns everything the adapters agree on: the collection and
//! stream data model, the error taxonomy, the port traits implemented by
//! `tubepull-browse`, and the collection crawler that drives pagination.
//! No HTTP, filesystem or CLI code lives here.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod download;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    CandidateStream, Collection, CollectionId, ContinuationToken, Item, Page, SelectedStream,
    VideoInfo,
};
pub use download::{
    CompletedItem, DownloadConfig, DownloadError, DownloadEvent, DownloadResult, DownloadTask,
    FailedItem, PoolReport, SkipReason, SkippedItem,
};
pub use ports::{
    BrowsePortError, BrowsePortResult, ByteReader, CollectionBrowserPort,
    DownloadEventEmitterPort, NoopDownloadEmitter, OpenedStream, VideoSourcePort,
};
pub use services::CollectionCrawler;
