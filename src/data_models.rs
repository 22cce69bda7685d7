use std::fmt;

use serde::{Deserialize, Serialize};

/// Content kinds the overlay client knows how to play.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Playlist,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Video => "video",
            MediaType::Playlist => "playlist",
        }
    }

    /// Parses a provider kind tag. Anything that is not a video or a
    /// playlist (channels, mixes, shelves) yields `None`.
    pub fn from_kind(kind: &str) -> Option<MediaType> {
        match kind {
            "video" => Some(MediaType::Video),
            "playlist" => Some(MediaType::Playlist),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record as the provider hands it back. Every field is optional because
/// the provider's shape is loose and not ours to enforce.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawResult {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
}

impl RawResult {
    pub fn new(kind: &str, title: &str, author: &str, url: &str) -> RawResult {
        RawResult {
            kind: Some(kind.to_string()),
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            url: Some(url.to_string()),
            thumbnail: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: &str) -> RawResult {
        self.thumbnail = Some(thumbnail.to_string());
        self
    }
}

/// The compact shape returned to the overlay.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    pub media_type: MediaType,
    pub media_title: String,
    pub channel_title: String,
    pub media_url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thumbnail: Option<String>,
}

impl From<NormalizedResult> for RawResult {
    fn from(result: NormalizedResult) -> RawResult {
        RawResult {
            kind: Some(result.media_type.as_str().to_string()),
            title: Some(result.media_title),
            author: Some(result.channel_title),
            url: Some(result.media_url),
            thumbnail: result.thumbnail,
        }
    }
}

/// Per-call knobs handed to a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub limit: usize,
    /// Restricts the query to a single content kind.
    pub kind: Option<MediaType>,
    /// Explicit results page to fetch instead of the one built from the term.
    pub source_hint: Option<String>,
}

impl SearchOptions {
    pub fn new(limit: usize) -> SearchOptions {
        SearchOptions {
            limit,
            kind: None,
            source_hint: None,
        }
    }

    pub fn only(mut self, kind: MediaType) -> SearchOptions {
        self.kind = Some(kind);
        self
    }

    pub fn with_source_hint(mut self, source_hint: impl Into<String>) -> SearchOptions {
        self.source_hint = Some(source_hint.into());
        self
    }
}
