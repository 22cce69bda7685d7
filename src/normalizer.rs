use crate::data_models::{MediaType, NormalizedResult, RawResult};

/// Projects raw provider records onto the overlay's result shape.
#[derive(Debug, Clone)]
pub struct Normalizer {
    accepted: Vec<MediaType>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::new(vec![MediaType::Video, MediaType::Playlist])
    }
}

impl Normalizer {
    pub fn new(accepted: Vec<MediaType>) -> Self {
        Self { accepted }
    }

    pub fn videos_only() -> Self {
        Self::new(vec![MediaType::Video])
    }

    pub fn only(kind: MediaType) -> Self {
        Self::new(vec![kind])
    }

    pub fn accepts(&self, kind: MediaType) -> bool {
        self.accepted.contains(&kind)
    }

    /// Keeps the first `limit` records of an accepted kind, in provider
    /// order. Records without a recognized kind are dropped.
    pub fn normalize(&self, raw: &[RawResult], limit: usize) -> Vec<NormalizedResult> {
        raw.iter()
            .filter_map(|record| self.project(record))
            .take(limit)
            .collect()
    }

    fn project(&self, record: &RawResult) -> Option<NormalizedResult> {
        let media_type = record.kind.as_deref().and_then(MediaType::from_kind)?;
        if !self.accepts(media_type) {
            return None;
        }
        Some(NormalizedResult {
            media_type,
            media_title: record.title.clone().unwrap_or_default(),
            channel_title: record.author.clone().unwrap_or_default(),
            media_url: record.url.clone().unwrap_or_default(),
            thumbnail: record.thumbnail.clone(),
        })
    }
}
