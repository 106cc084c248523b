//! Core services built on the ports.

mod crawler;

pub use crawler::CollectionCrawler;
