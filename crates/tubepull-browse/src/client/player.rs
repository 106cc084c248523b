//! Video resolution and stream opening.

use tracing::debug;
use tubepull_core::{ByteReader, CandidateStream, VideoInfo};
use url::Url;

use crate::error::{BrowseError, BrowseResult};
use crate::http::HttpBackend;
use crate::input::extract_video_id;
use crate::parsing::parse_player_response;
use crate::url::build_player_body;

use super::BrowseClient;

impl<B: HttpBackend> BrowseClient<B> {
    /// Resolve a watch URL or bare id through the player endpoint.
    pub(crate) async fn player_lookup(&self, url_or_id: &str) -> BrowseResult<VideoInfo> {
        let video_id =
            extract_video_id(url_or_id).ok_or_else(|| BrowseError::InvalidVideoRef {
                input: url_or_id.to_string(),
            })?;

        let body = build_player_body(&self.config, &video_id);
        let json = self
            .backend
            .post_json(
                &self.config.player_url,
                &body,
                &self.config.player_client.user_agent,
            )
            .await?;

        let info = parse_player_response(&json, &video_id)?;
        debug!(
            video_id = %info.id,
            candidates = info.candidates.len(),
            "Video resolved"
        );
        Ok(info)
    }

    /// Open the byte stream of a candidate.
    ///
    /// Returns the reader and the expected size: the advertised
    /// `contentLength` when present, otherwise the response length, otherwise
    /// 0.
    pub(crate) async fn open_candidate(
        &self,
        candidate: &CandidateStream,
    ) -> BrowseResult<(ByteReader, u64)> {
        let raw = candidate
            .url
            .as_deref()
            .ok_or(BrowseError::CipheredStream {
                itag: candidate.itag,
            })?;
        let url = Url::parse(raw)?;

        let (reader, length) = self
            .backend
            .open_stream(&url, &self.config.player_client.user_agent)
            .await?;

        Ok((reader, candidate.content_length.or(length).unwrap_or(0)))
    }
}
