//! Media stream descriptors.

use serde::{Deserialize, Serialize};

/// One stream variant offered for a video.
///
/// Descriptors come from the remote side and are often partially populated:
/// audio-only variants have no quality label, video-only variants report no
/// audio, and some variants carry no direct URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateStream {
    /// Remote format identifier.
    pub itag: u32,
    /// Quality label such as `"1080p"`; empty for audio-only variants.
    pub quality_label: String,
    /// Whether the stream carries at least one audio channel.
    pub has_audio: bool,
    /// Container and codec description, e.g. `video/mp4; codecs="avc1.42001E, mp4a.40.2"`.
    pub mime_type: String,
    /// Advertised size in bytes.
    pub content_length: Option<u64>,
    /// Direct download URL, absent for ciphered variants.
    pub url: Option<String>,
}

impl CandidateStream {
    /// Create a descriptor with just the fields format selection looks at.
    pub fn new(quality_label: impl Into<String>, has_audio: bool) -> Self {
        Self {
            quality_label: quality_label.into(),
            has_audio,
            ..Self::default()
        }
    }

    /// Set the format identifier.
    #[must_use]
    pub const fn with_itag(mut self, itag: u32) -> Self {
        self.itag = itag;
        self
    }

    /// Set the direct URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the advertised size.
    #[must_use]
    pub const fn with_content_length(mut self, length: u64) -> Self {
        self.content_length = Some(length);
        self
    }
}

/// The stream picked for one download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedStream {
    /// The chosen descriptor.
    pub stream: CandidateStream,
    /// Numeric rank derived from the quality label (1080 for `"1080p"`).
    pub rank: u32,
}

/// Metadata and stream candidates for one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Remote video identifier.
    pub id: String,
    /// Video title.
    pub title: String,
    /// Channel name, when reported.
    pub author: Option<String>,
    /// Every stream variant offered, in response order.
    pub candidates: Vec<CandidateStream>,
}
