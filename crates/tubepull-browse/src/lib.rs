//! InnerTube client for tubepull.
//!
//! Implements the core ports against the `youtubei/v1` endpoints:
//!
//! - [`CollectionBrowserPort`](tubepull_core::CollectionBrowserPort) via the
//!   `browse` endpoint (one playlist page per call)
//! - [`VideoSourcePort`](tubepull_core::VideoSourcePort) via the `player`
//!   endpoint and direct stream URLs
//!
//! Also provides the URL helpers the CLI uses to classify its input.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultBrowseClient is meant to be used through the port traits, not its
// internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod input;
mod models;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultBrowseClient;

// Configuration
pub use config::{BrowseClientConfig, ClientProfile};

// Errors
pub use error::BrowseError;

// Input classification
pub use input::{extract_video_id, is_collection_url, parse_collection_id, watch_url};
