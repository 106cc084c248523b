//! Internal types for the InnerTube API.
//!
//! Response types mirror only the parts of the JSON we read. Every field is
//! optional or defaulted: responses are routinely missing whole branches and
//! an absent branch is not an error.

use serde::Deserialize;
use url::Url;

use crate::config::ClientProfile;

// ============================================================================
// Internal configuration
// ============================================================================

/// Resolved endpoint configuration used by the client.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Full `browse` endpoint URL including the key parameter
    pub browse_url: Url,
    /// Full `player` endpoint URL including the key parameter
    pub player_url: Url,
    /// Interface language (`hl`)
    pub language: String,
    /// Content region (`gl`)
    pub region: String,
    /// Profile for browse requests
    pub web_client: ClientProfile,
    /// Profile for player requests and streams
    pub player_client: ClientProfile,
    /// Request timeout for JSON endpoints
    pub timeout: std::time::Duration,
}

// ============================================================================
// Shared text types
// ============================================================================

/// A text node: either `simpleText` or a list of `runs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Text {
    pub simple_text: Option<String>,
    pub runs: Vec<TextRun>,
}

impl Text {
    /// Flatten the node into a plain string.
    pub fn text(&self) -> String {
        match &self.simple_text {
            Some(simple) => simple.clone(),
            None => self.runs.iter().map(|r| r.text.as_str()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextRun {
    pub text: String,
}

// ============================================================================
// Browse response
// ============================================================================

/// Top level of a `browse` response.
///
/// A first-page response fills `contents`, a continuation response fills
/// `continuationContents`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowseResponse {
    pub contents: Option<BrowseContents>,
    pub continuation_contents: Option<ContinuationContents>,
    pub metadata: Option<BrowseMetadata>,
    pub header: Option<BrowseHeader>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowseContents {
    pub two_column_browse_results_renderer: Option<TwoColumnBrowseResults>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TwoColumnBrowseResults {
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tab {
    pub tab_renderer: Option<TabRenderer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TabRenderer {
    pub content: Option<TabContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabContent {
    pub section_list_renderer: Option<SectionList>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SectionList {
    pub contents: Vec<Section>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub item_section_renderer: Option<ItemSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemSection {
    pub contents: Vec<ItemSectionEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemSectionEntry {
    pub playlist_video_list_renderer: Option<PlaylistVideoList>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContinuationContents {
    pub playlist_video_list_continuation: Option<PlaylistVideoList>,
}

/// A list of playlist entries plus the descriptors of the next page.
///
/// Same shape for `playlistVideoListRenderer` (first page) and
/// `playlistVideoListContinuation` (later pages).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistVideoList {
    pub contents: Vec<PlaylistEntry>,
    pub continuations: Vec<ContinuationDescriptor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaylistEntry {
    pub playlist_video_renderer: Option<PlaylistVideoRenderer>,
    pub continuation_item_renderer: Option<ContinuationItemRenderer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaylistVideoRenderer {
    pub video_id: Option<String>,
    pub title: Option<Text>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContinuationDescriptor {
    pub next_continuation_data: Option<NextContinuationData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NextContinuationData {
    pub continuation: Option<String>,
}

/// Inline continuation entry used by newer responses in place of
/// `continuations`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContinuationItemRenderer {
    pub continuation_endpoint: Option<ContinuationEndpoint>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContinuationEndpoint {
    pub continuation_command: Option<ContinuationCommand>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContinuationCommand {
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowseMetadata {
    pub playlist_metadata_renderer: Option<PlaylistMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistMetadata {
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowseHeader {
    pub playlist_header_renderer: Option<PlaylistHeader>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistHeader {
    pub title: Option<Text>,
}

// ============================================================================
// Player response
// ============================================================================

/// Top level of a `player` response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerResponse {
    pub playability_status: Option<PlayabilityStatus>,
    pub video_details: Option<VideoDetails>,
    pub streaming_data: Option<StreamingData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayabilityStatus {
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoDetails {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamingData {
    /// Progressive formats
    pub formats: Vec<PlayerFormat>,
    /// Separate audio or video formats
    pub adaptive_formats: Vec<PlayerFormat>,
}

/// One format entry from `streamingData`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerFormat {
    pub itag: u32,
    pub url: Option<String>,
    pub signature_cipher: Option<String>,
    pub mime_type: Option<String>,
    pub quality_label: Option<String>,
    pub audio_channels: Option<u32>,
    /// Decimal string in the response
    pub content_length: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_prefers_simple_text() {
        let text: Text = serde_json::from_value(json!({
            "simpleText": "Plain",
            "runs": [{"text": "Ignored"}]
        }))
        .unwrap();
        assert_eq!(text.text(), "Plain");
    }

    #[test]
    fn test_text_joins_runs() {
        let text: Text =
            serde_json::from_value(json!({"runs": [{"text": "Part "}, {"text": "two"}]})).unwrap();
        assert_eq!(text.text(), "Part two");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let response: BrowseResponse = serde_json::from_value(json!({
            "responseContext": {"visitorData": "x"},
            "trackingParams": "abc"
        }))
        .unwrap();
        assert!(response.contents.is_none());
        assert!(response.continuation_contents.is_none());
    }

    #[test]
    fn test_player_format_parses_strings() {
        let format: PlayerFormat = serde_json::from_value(json!({
            "itag": 22,
            "mimeType": "video/mp4; codecs=\"avc1.64001F, mp4a.40.2\"",
            "qualityLabel": "720p",
            "audioChannels": 2,
            "contentLength": "1048576"
        }))
        .unwrap();
        assert_eq!(format.itag, 22);
        assert_eq!(format.quality_label.as_deref(), Some("720p"));
        assert_eq!(format.audio_channels, Some(2));
        assert_eq!(format.content_length.as_deref(), Some("1048576"));
        assert!(format.url.is_none());
    }
}
