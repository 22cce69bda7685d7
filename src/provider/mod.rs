//! Search providers: the outbound side of the proxy.

use async_trait::async_trait;

use crate::data_models::{RawResult, SearchOptions};
use crate::error::Result;

pub mod youtube;

pub use youtube::YoutubeScraper;

/// Anything that can turn a term into raw result records.
///
/// Implementations own their transport; callers only see raw records in
/// provider order or a [`ProviderError`](crate::error::ProviderError).
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, term: &str, options: &SearchOptions) -> Result<Vec<RawResult>>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
