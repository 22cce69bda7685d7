use anyhow::Result;
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use ytgbss::api::{AppState, create_router};
use ytgbss::data_models::{MediaType, RawResult, SearchOptions};
use ytgbss::error::ProviderError;
use ytgbss::orchestrator::{SearchOrchestrator, SearchPlan};
use ytgbss::provider::SearchProvider;

mod test_helpers {
    use super::*;

    /// Answers with more records than any plan asks for, so truncation is
    /// always exercised.
    #[derive(Default)]
    pub struct StubProvider {
        pub calls: AtomicUsize,
        pub terms: Mutex<Vec<String>>,
        pub fail: bool,
    }

    impl StubProvider {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Terms received, sorted so concurrent split calls compare stably.
        pub fn terms(&self) -> Vec<String> {
            let mut terms = self.terms.lock().unwrap().clone();
            terms.sort();
            terms
        }
    }

    fn records(kind: &str, count: usize) -> Vec<RawResult> {
        (0..count)
            .map(|i| {
                RawResult::new(
                    kind,
                    &format!("{kind} {i}"),
                    "Lofi Girl",
                    &format!("https://www.youtube.com/{kind}/{i}"),
                )
                .with_thumbnail(&format!("https://i.ytimg.com/{kind}/{i}.jpg"))
            })
            .collect()
    }

    #[async_trait]
    impl SearchProvider for StubProvider {
        async fn search(
            &self,
            term: &str,
            options: &SearchOptions,
        ) -> Result<Vec<RawResult>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.terms.lock().unwrap().push(term.to_string());
            if self.fail {
                return Err(ProviderError::Status(429));
            }
            Ok(match options.kind {
                Some(MediaType::Video) => records("video", 7),
                Some(MediaType::Playlist) => records("playlist", 4),
                None => {
                    let mut all = records("channel", 1);
                    all.extend(records("video", 8));
                    all.extend(records("playlist", 8));
                    all
                }
            })
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    pub fn app(provider: Arc<StubProvider>, legacy_routes: bool) -> Router {
        let state = AppState::new(
            SearchOrchestrator::new(provider.clone(), SearchPlan::default()),
            SearchOrchestrator::new(provider, SearchPlan::Single { limit: 10 }),
        );
        create_router(state, legacy_routes)
    }

    pub async fn send(app: Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = app.oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, body))
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_current_search_returns_videos_then_playlists() -> Result<()> {
    let provider = Arc::new(StubProvider::default());
    let (status, body) = send(app(provider.clone(), true), get("/current/search/lofi")).await?;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().expect("array body");
    assert_eq!(results.len(), 8);

    let kinds: Vec<&str> = results
        .iter()
        .map(|r| r["mediaType"].as_str().unwrap())
        .collect();
    assert_eq!(kinds[..5], ["video"; 5]);
    assert_eq!(kinds[5..], ["playlist"; 3]);

    assert_eq!(
        results[0],
        json!({
            "mediaType": "video",
            "mediaTitle": "video 0",
            "channelTitle": "Lofi Girl",
            "mediaUrl": "https://www.youtube.com/video/0",
            "thumbnail": "https://i.ytimg.com/video/0.jpg",
        })
    );
    assert_eq!(results[5]["mediaTitle"], "playlist 0");
    assert_eq!(provider.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_missing_term_is_bad_request_without_provider_call() -> Result<()> {
    for uri in ["/current/search", "/current/search/", "/current/search/%20%20"] {
        let provider = Arc::new(StubProvider::default());
        let (status, body) = send(app(provider.clone(), true), get(uri)).await?;

        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
        assert_eq!(body, json!({"error": "Bad request!"}));
        assert_eq!(provider.calls(), 0, "uri {uri}");
    }
    Ok(())
}

#[tokio::test]
async fn test_provider_failure_is_internal_error() -> Result<()> {
    let provider = Arc::new(StubProvider::failing());
    let (status, body) = send(app(provider.clone(), true), get("/current/search/lofi")).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal Server Error!"}));
    assert!(provider.calls() >= 1);
    Ok(())
}

#[tokio::test]
async fn test_error_body_does_not_leak_details() -> Result<()> {
    let provider = Arc::new(StubProvider::failing());
    let (_, body) = send(app(provider, true), get("/search/lofi")).await?;

    let text = body.to_string();
    assert!(!text.contains("429"));
    assert!(!text.contains("status"));
    Ok(())
}

#[tokio::test]
async fn test_legacy_get_uses_single_call() -> Result<()> {
    let provider = Arc::new(StubProvider::default());
    let (status, body) = send(app(provider.clone(), true), get("/search/lofi")).await?;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().expect("array body");
    assert_eq!(results.len(), 10);
    assert!(results.iter().all(|r| r["mediaType"] != "channel"));
    assert_eq!(results[0]["mediaTitle"], "video 0");
    assert_eq!(results[8]["mediaTitle"], "playlist 0");
    assert_eq!(provider.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_legacy_post_searches_body_term() -> Result<()> {
    let provider = Arc::new(StubProvider::default());
    let (status, body) = send(
        app(provider.clone(), true),
        post_json("/search", r#"{"term": "lofi"}"#),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(10));
    assert_eq!(provider.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_legacy_post_rejects_bad_bodies() -> Result<()> {
    for body in [r#"{}"#, r#"{"term": ""}"#, r#"{"term": "#, "not json"] {
        let provider = Arc::new(StubProvider::default());
        let (status, response) =
            send(app(provider.clone(), true), post_json("/search", body)).await?;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(response, json!({"error": "Bad request!"}));
        assert_eq!(provider.calls(), 0);
    }
    Ok(())
}

#[tokio::test]
async fn test_legacy_post_without_content_type_is_bad_request() -> Result<()> {
    let provider = Arc::new(StubProvider::default());
    let request = Request::builder()
        .method("POST")
        .uri("/search")
        .body(Body::from(r#"{"term": "lofi"}"#))?;
    let (status, _) = send(app(provider.clone(), true), request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(provider.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_legacy_routes_can_be_disabled() -> Result<()> {
    let provider = Arc::new(StubProvider::default());
    let (status, _) = send(app(provider.clone(), false), get("/search/lofi")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app(provider.clone(), false), get("/current/search/lofi")).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_cors_allows_any_origin() -> Result<()> {
    let provider = Arc::new(StubProvider::default());
    let request = Request::builder()
        .uri("/current/search/lofi")
        .header(header::ORIGIN, "ms-gamebar://overlay")
        .body(Body::empty())?;
    let response = app(provider, true).oneshot(request).await?;

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    Ok(())
}

#[tokio::test]
async fn test_percent_encoded_terms_are_decoded() -> Result<()> {
    let provider = Arc::new(StubProvider::default());
    let (status, body) = send(
        app(provider.clone(), true),
        get("/current/search/lofi%20hip%20hop"),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(8));
    assert_eq!(provider.terms(), vec!["lofi hip hop", "lofi hip hop"]);
    Ok(())
}

#[tokio::test]
async fn test_padded_terms_are_trimmed_before_search() -> Result<()> {
    let provider = Arc::new(StubProvider::default());
    let (status, _) = send(app(provider.clone(), true), get("/search/%20lofi%20")).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.terms(), vec!["lofi"]);
    Ok(())
}

#[tokio::test]
async fn test_legacy_post_forwards_trimmed_body_term() -> Result<()> {
    let provider = Arc::new(StubProvider::default());
    let (status, _) = send(
        app(provider.clone(), true),
        post_json("/search", r#"{"term": "  chill jazz "}"#),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.terms(), vec!["chill jazz"]);
    Ok(())
}
