//! Turns a term into the final result list by composing provider calls.
//!
//! Two shapes are supported:
//!
//! - single-call: one query over every kind, normalized once
//! - split-call: a video query and a playlist query run concurrently and
//!   are concatenated videos first
//!
//! Either way a provider failure fails the whole search; there is no
//! partial-result fallback.

use std::fmt;
use std::sync::Arc;

use crate::data_models::{MediaType, NormalizedResult, SearchOptions};
use crate::error::Result;
use crate::normalizer::Normalizer;
use crate::provider::SearchProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPlan {
    Single { limit: usize },
    Split { videos: usize, playlists: usize },
}

impl SearchPlan {
    /// Upper bound on the number of results this plan can return.
    pub fn max_results(&self) -> usize {
        match *self {
            SearchPlan::Single { limit } => limit,
            SearchPlan::Split { videos, playlists } => videos + playlists,
        }
    }
}

impl Default for SearchPlan {
    fn default() -> Self {
        SearchPlan::Split {
            videos: 5,
            playlists: 3,
        }
    }
}

impl fmt::Display for SearchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchPlan::Single { limit } => write!(f, "single({limit})"),
            SearchPlan::Split { videos, playlists } => write!(f, "split({videos}+{playlists})"),
        }
    }
}

pub struct SearchOrchestrator {
    provider: Arc<dyn SearchProvider>,
    plan: SearchPlan,
    normalizer: Normalizer,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn SearchProvider>, plan: SearchPlan) -> Self {
        Self {
            provider,
            plan,
            normalizer: Normalizer::default(),
        }
    }

    /// Replaces the normalizer used by the single-call plan. The split plan
    /// always keeps each call to its own kind.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn plan(&self) -> SearchPlan {
        self.plan
    }

    pub async fn orchestrate(&self, term: &str) -> Result<Vec<NormalizedResult>> {
        let results = match self.plan {
            SearchPlan::Single { limit } => {
                let raw = self
                    .provider
                    .search(term, &SearchOptions::new(limit))
                    .await?;
                self.normalizer.normalize(&raw, limit)
            }
            SearchPlan::Split {
                videos: video_limit,
                playlists: playlist_limit,
            } => {
                let (mut videos, playlists) = futures::try_join!(
                    self.search_kind(term, MediaType::Video, video_limit),
                    self.search_kind(term, MediaType::Playlist, playlist_limit),
                )?;
                videos.extend(playlists);
                videos
            }
        };

        tracing::debug!(
            provider = self.provider.name(),
            plan = %self.plan,
            count = results.len(),
            "search orchestrated"
        );
        Ok(results)
    }

    async fn search_kind(
        &self,
        term: &str,
        kind: MediaType,
        limit: usize,
    ) -> Result<Vec<NormalizedResult>> {
        let options = SearchOptions::new(limit).only(kind);
        let raw = self.provider.search(term, &options).await?;
        Ok(Normalizer::only(kind).normalize(&raw, limit))
    }
}
