use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::data_models::{MediaType, RawResult, SearchOptions};
use crate::error::{ProviderError, Result};

use super::SearchProvider;

const RESULTS_URL: &str = "https://www.youtube.com/results";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const PLAYLIST_URL: &str = "https://www.youtube.com/playlist?list=";
const CHANNEL_URL: &str = "https://www.youtube.com/channel/";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// `sp` filter values the results page understands.
const VIDEO_FILTER: &str = "EgIQAQ==";
const PLAYLIST_FILTER: &str = "EgIQAw==";

static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("`script` is a valid selector"));

/// Scrapes the public YouTube results page. No API key, no cookies kept
/// between requests.
pub struct YoutubeScraper {
    client: reqwest::Client,
}

impl YoutubeScraper {
    pub fn new(timeout: Option<Duration>) -> Result<YoutubeScraper> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(Self::default_headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Client(format!("failed to build HTTP client: {e}")))?;
        Ok(YoutubeScraper { client })
    }

    fn default_headers() -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers
    }

    /// The page to fetch for `term`. A source hint wins over the term.
    pub fn results_url(term: &str, options: &SearchOptions) -> Result<Url> {
        if let Some(hint) = &options.source_hint {
            return Url::parse(hint)
                .map_err(|e| ProviderError::Client(format!("invalid source hint {hint}: {e}")));
        }

        let mut params = vec![("search_query", term)];
        match options.kind {
            Some(MediaType::Video) => params.push(("sp", VIDEO_FILTER)),
            Some(MediaType::Playlist) => params.push(("sp", PLAYLIST_FILTER)),
            None => {}
        }
        Url::parse_with_params(RESULTS_URL, &params)
            .map_err(|e| ProviderError::Client(format!("failed to build results url: {e}")))
    }

    /// Reads every recognizable result out of a results page, in page order.
    pub fn parse_results_page(html: &str) -> Result<Vec<RawResult>> {
        let data = extract_initial_data(html)?;
        let sections = data
            .pointer("/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents")
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::Parse("results section missing from ytInitialData".into()))?;

        let results = sections
            .iter()
            .filter_map(|section| {
                section
                    .pointer("/itemSectionRenderer/contents")
                    .and_then(Value::as_array)
            })
            .flatten()
            .filter_map(parse_item)
            .collect();
        Ok(results)
    }
}

#[async_trait]
impl SearchProvider for YoutubeScraper {
    async fn search(&self, term: &str, options: &SearchOptions) -> Result<Vec<RawResult>> {
        let url = Self::results_url(term, options)?;
        tracing::debug!(%url, "fetching results page");

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let results = restrict_to_kind(Self::parse_results_page(&body)?, options);
        tracing::debug!(count = results.len(), "parsed results page");
        Ok(results)
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}

/// A kind-filtered page still slips in the odd shelf item of another kind.
/// Unfiltered queries are left whole for the normalizer.
fn restrict_to_kind(mut results: Vec<RawResult>, options: &SearchOptions) -> Vec<RawResult> {
    if let Some(kind) = options.kind {
        results.retain(|r| r.kind.as_deref() == Some(kind.as_str()));
        results.truncate(options.limit);
    }
    results
}

fn extract_initial_data(html: &str) -> Result<Value> {
    let document = Html::parse_document(html);
    let mut last_err = None;

    for script in document.select(&SCRIPT_SELECTOR) {
        let text = script.text().collect::<String>();
        let Some(idx) = text.find("ytInitialData") else {
            continue;
        };
        let rest = &text[idx..];
        let Some(start) = rest.find('=').and_then(|eq| rest[eq..].find('{').map(|b| eq + b))
        else {
            continue;
        };
        // Only the object literal; the script may carry more statements after it.
        match serde_json::Deserializer::from_str(&rest[start..])
            .into_iter::<Value>()
            .next()
        {
            Some(Ok(data)) => return Ok(data),
            Some(Err(e)) => last_err = Some(e.into()),
            None => {}
        }
    }

    Err(last_err.unwrap_or_else(|| ProviderError::Parse("ytInitialData not found".into())))
}

fn parse_item(item: &Value) -> Option<RawResult> {
    if let Some(r) = item.get("videoRenderer") {
        let id = r.get("videoId")?.as_str()?;
        return Some(RawResult {
            kind: Some("video".into()),
            title: r.get("title").and_then(text_of),
            author: r
                .get("ownerText")
                .or_else(|| r.get("longBylineText"))
                .and_then(text_of),
            url: Some(format!("{WATCH_URL}{id}")),
            thumbnail: r.get("thumbnail").and_then(last_thumbnail),
        });
    }

    if let Some(r) = item.get("playlistRenderer") {
        let id = r.get("playlistId")?.as_str()?;
        return Some(RawResult {
            kind: Some("playlist".into()),
            title: r.get("title").and_then(text_of),
            author: r
                .get("shortBylineText")
                .or_else(|| r.get("longBylineText"))
                .and_then(text_of),
            url: Some(format!("{PLAYLIST_URL}{id}")),
            thumbnail: r
                .pointer("/thumbnails/0")
                .or_else(|| r.pointer("/thumbnailRenderer/playlistVideoThumbnailRenderer/thumbnail"))
                .and_then(last_thumbnail),
        });
    }

    if let Some(r) = item.get("channelRenderer") {
        let id = r.get("channelId")?.as_str()?;
        let title = r.get("title").and_then(text_of);
        return Some(RawResult {
            kind: Some("channel".into()),
            author: title.clone(),
            title,
            url: Some(format!("{CHANNEL_URL}{id}")),
            thumbnail: r.get("thumbnail").and_then(last_thumbnail),
        });
    }

    if let Some(r) = item.get("radioRenderer") {
        let id = r.get("playlistId")?.as_str()?;
        return Some(RawResult {
            kind: Some("mix".into()),
            title: r.get("title").and_then(text_of),
            author: r.get("longBylineText").and_then(text_of),
            url: Some(format!("{PLAYLIST_URL}{id}")),
            thumbnail: r.get("thumbnail").and_then(last_thumbnail),
        });
    }

    None
}

/// YouTube text is either `{simpleText}` or `{runs: [{text}, ...]}`.
fn text_of(value: &Value) -> Option<String> {
    if let Some(text) = value.get("simpleText").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    let runs = value.get("runs")?.as_array()?;
    let text: String = runs
        .iter()
        .filter_map(|run| run.get("text").and_then(Value::as_str))
        .collect();
    Some(text)
}

/// Thumbnail lists are ordered smallest first.
fn last_thumbnail(value: &Value) -> Option<String> {
    let url = value
        .get("thumbnails")?
        .as_array()?
        .last()?
        .get("url")?
        .as_str()?;
    if url.starts_with("//") {
        Some(format!("https:{url}"))
    } else {
        Some(url.to_string())
    }
}
