//! Parsing of `browse` and `player` responses.
//!
//! Pure functions from raw JSON to domain types. Missing branches degrade to
//! empty values; a branch with the wrong type is an error, since dropping it
//! could silently cut a listing short.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use tubepull_core::{CandidateStream, ContinuationToken, Item, Page, VideoInfo};

use crate::error::{BrowseError, BrowseResult};
use crate::models::{
    BrowseResponse, PlayerFormat, PlayerResponse, PlaylistEntry, PlaylistVideoList,
};

// ============================================================================
// Browse responses
// ============================================================================

/// Which of the two known layouts a browse response uses.
#[derive(Debug)]
pub enum ResponseShape<'a> {
    /// `continuationContents.playlistVideoListContinuation`
    Continuation(&'a PlaylistVideoList),
    /// `contents.twoColumnBrowseResultsRenderer`, flattened to every
    /// `playlistVideoListRenderer` found under its tabs
    FirstPage(Vec<&'a PlaylistVideoList>),
    /// Neither layout is present
    Empty,
}

/// Classify a browse response.
///
/// The continuation layout is checked first and wins when both are present.
pub fn classify(response: &BrowseResponse) -> ResponseShape<'_> {
    if let Some(list) = response
        .continuation_contents
        .as_ref()
        .and_then(|c| c.playlist_video_list_continuation.as_ref())
    {
        return ResponseShape::Continuation(list);
    }

    let Some(results) = response
        .contents
        .as_ref()
        .and_then(|c| c.two_column_browse_results_renderer.as_ref())
    else {
        return ResponseShape::Empty;
    };

    let lists = results
        .tabs
        .iter()
        .filter_map(|tab| tab.tab_renderer.as_ref())
        .filter_map(|tab| tab.content.as_ref())
        .filter_map(|content| content.section_list_renderer.as_ref())
        .flat_map(|sections| &sections.contents)
        .filter_map(|section| section.item_section_renderer.as_ref())
        .flat_map(|items| &items.contents)
        .filter_map(|entry| entry.playlist_video_list_renderer.as_ref())
        .collect();

    ResponseShape::FirstPage(lists)
}

/// Parse one browse response into a page.
///
/// Entries without a video renderer or with an empty id are dropped.
///
/// # Errors
///
/// Returns `InvalidResponse` when any field has an unexpected type, even one
/// outside the item list: the page cannot be trusted to be complete.
pub fn parse_browse_response(json: &Value) -> BrowseResult<Page> {
    let response = BrowseResponse::deserialize(json).map_err(|e| {
        warn!(error = %e, "Browse response has an unexpected layout");
        BrowseError::InvalidResponse {
            message: format!("unexpected browse response layout: {e}"),
        }
    })?;

    let page = match classify(&response) {
        ResponseShape::Continuation(list) => Page {
            items: collect_items(std::slice::from_ref(&list)),
            next_token: next_token(std::slice::from_ref(&list)),
            title: None,
        },
        ResponseShape::FirstPage(lists) => Page {
            items: collect_items(&lists),
            next_token: next_token(&lists),
            title: collection_title(&response),
        },
        ResponseShape::Empty => {
            debug!("Browse response has no playlist contents");
            Page::empty()
        }
    };
    Ok(page)
}

fn collect_items(lists: &[&PlaylistVideoList]) -> Vec<Item> {
    let entries = lists.iter().flat_map(|list| &list.contents);
    let mut dropped = 0_usize;
    let items: Vec<Item> = entries
        .filter_map(|entry| {
            let item = to_item(entry);
            if item.is_none() && entry.playlist_video_renderer.is_some() {
                dropped += 1;
            }
            item
        })
        .collect();

    if dropped > 0 {
        debug!(dropped, "Skipped playlist entries without a video id");
    }
    items
}

fn to_item(entry: &PlaylistEntry) -> Option<Item> {
    let renderer = entry.playlist_video_renderer.as_ref()?;
    let id = renderer.video_id.as_deref().filter(|id| !id.is_empty())?;
    let title = renderer
        .title
        .as_ref()
        .map(crate::models::Text::text)
        .unwrap_or_default();
    Some(Item::new(id, title))
}

/// First non-empty continuation token across the lists.
///
/// Classic `continuations[].nextContinuationData` descriptors are preferred;
/// an inline `continuationItemRenderer` entry is used when none exist.
fn next_token(lists: &[&PlaylistVideoList]) -> ContinuationToken {
    let classic = lists.iter().flat_map(|list| &list.continuations).find_map(|c| {
        c.next_continuation_data
            .as_ref()?
            .continuation
            .as_deref()
            .filter(|t| !t.is_empty())
    });

    let inline = || {
        lists
            .iter()
            .flat_map(|list| &list.contents)
            .find_map(|entry| {
                entry
                    .continuation_item_renderer
                    .as_ref()?
                    .continuation_endpoint
                    .as_ref()?
                    .continuation_command
                    .as_ref()?
                    .token
                    .as_deref()
                    .filter(|t| !t.is_empty())
            })
    };

    classic
        .or_else(inline)
        .map_or_else(ContinuationToken::first_page, ContinuationToken::from_remote)
}

fn collection_title(response: &BrowseResponse) -> Option<String> {
    let from_metadata = response
        .metadata
        .as_ref()
        .and_then(|m| m.playlist_metadata_renderer.as_ref())
        .and_then(|m| m.title.clone());

    from_metadata
        .or_else(|| {
            response
                .header
                .as_ref()
                .and_then(|h| h.playlist_header_renderer.as_ref())
                .and_then(|h| h.title.as_ref())
                .map(crate::models::Text::text)
        })
        .filter(|t| !t.trim().is_empty())
}

// ============================================================================
// Player responses
// ============================================================================

/// Parse a player response into video metadata and candidates.
///
/// Progressive formats come first, followed by adaptive ones, each in
/// response order.
pub fn parse_player_response(json: &Value, video_id: &str) -> BrowseResult<VideoInfo> {
    let response =
        PlayerResponse::deserialize(json).map_err(|e| BrowseError::InvalidResponse {
            message: format!("unexpected player response layout: {e}"),
        })?;

    let status = response
        .playability_status
        .as_ref()
        .and_then(|p| p.status.as_deref())
        .unwrap_or("UNKNOWN");
    if status != "OK" {
        let reason = response
            .playability_status
            .as_ref()
            .and_then(|p| p.reason.as_deref())
            .unwrap_or("no reason given");
        return Err(BrowseError::Unplayable {
            video_id: video_id.to_string(),
            reason: format!("{status}: {reason}"),
        });
    }

    let details = response.video_details.unwrap_or_default();
    let streaming = response.streaming_data.unwrap_or_default();
    let candidates: Vec<CandidateStream> = streaming
        .formats
        .iter()
        .chain(&streaming.adaptive_formats)
        .map(to_candidate)
        .collect();

    debug!(
        video_id,
        progressive = streaming.formats.len(),
        adaptive = streaming.adaptive_formats.len(),
        "Parsed player response"
    );

    Ok(VideoInfo {
        id: details
            .video_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| video_id.to_string()),
        title: details.title.unwrap_or_default(),
        author: details.author,
        candidates,
    })
}

fn to_candidate(format: &PlayerFormat) -> CandidateStream {
    CandidateStream {
        itag: format.itag,
        quality_label: format.quality_label.clone().unwrap_or_default(),
        has_audio: format.audio_channels.is_some_and(|n| n > 0),
        mime_type: format.mime_type.clone().unwrap_or_default(),
        content_length: format
            .content_length
            .as_deref()
            .and_then(|n| n.parse().ok()),
        url: format.url.clone(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{Value, json};

    /// A playlist video entry.
    pub fn video(id: &str, title: &str) -> Value {
        json!({
            "playlistVideoRenderer": {
                "videoId": id,
                "title": {"runs": [{"text": title}]}
            }
        })
    }

    /// A first-page browse response.
    pub fn first_page(title: &str, entries: &[Value], token: Option<&str>) -> Value {
        let continuations = token.map_or_else(Vec::new, |t| {
            vec![json!({"nextContinuationData": {"continuation": t}})]
        });
        json!({
            "contents": {
                "twoColumnBrowseResultsRenderer": {
                    "tabs": [{
                        "tabRenderer": {
                            "content": {
                                "sectionListRenderer": {
                                    "contents": [{
                                        "itemSectionRenderer": {
                                            "contents": [{
                                                "playlistVideoListRenderer": {
                                                    "contents": entries,
                                                    "continuations": continuations
                                                }
                                            }]
                                        }
                                    }]
                                }
                            }
                        }
                    }]
                }
            },
            "metadata": {"playlistMetadataRenderer": {"title": title}}
        })
    }

    /// A continuation browse response.
    pub fn continuation_page(entries: &[Value], token: Option<&str>) -> Value {
        let continuations = token.map_or_else(Vec::new, |t| {
            vec![json!({"nextContinuationData": {"continuation": t}})]
        });
        json!({
            "continuationContents": {
                "playlistVideoListContinuation": {
                    "contents": entries,
                    "continuations": continuations
                }
            }
        })
    }

    /// A playable player response with the given formats.
    pub fn player(video_id: &str, title: &str, formats: &[Value]) -> Value {
        json!({
            "playabilityStatus": {"status": "OK"},
            "videoDetails": {"videoId": video_id, "title": title, "author": "Uploader"},
            "streamingData": {"formats": formats, "adaptiveFormats": []}
        })
    }

    /// A progressive format entry.
    pub fn format(itag: u32, label: &str, audio_channels: u32, url: &str) -> Value {
        json!({
            "itag": itag,
            "url": url,
            "mimeType": "video/mp4; codecs=\"avc1.64001F, mp4a.40.2\"",
            "qualityLabel": label,
            "audioChannels": audio_channels,
            "contentLength": "1024"
        })
    }
}
