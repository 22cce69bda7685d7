use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use std::time::Instant;

use crate::data_models::NormalizedResult;
use crate::orchestrator::SearchOrchestrator;

use super::AppState;
use super::error::ApiError;
use super::models::SearchRequest;

type SearchResponse = Result<Json<Vec<NormalizedResult>>, ApiError>;

pub async fn current_search_handler(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> SearchResponse {
    tracing::info!("got GET current search request");
    run_search(&state.current, Some(term)).await
}

pub async fn legacy_get_handler(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> SearchResponse {
    tracing::info!("got GET search request");
    run_search(&state.legacy, Some(term)).await
}

pub async fn legacy_post_handler(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> SearchResponse {
    tracing::info!("got POST search request");
    let Json(request) =
        body.map_err(|e| ApiError::BadRequest(format!("Missing or malformed body: {e}")))?;
    run_search(&state.legacy, request.term).await
}

/// Routes that match the search prefix without a term.
pub async fn missing_term_handler() -> ApiError {
    ApiError::BadRequest("Missing request parameter.".to_string())
}

async fn run_search(orchestrator: &SearchOrchestrator, term: Option<String>) -> SearchResponse {
    let term = term
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing request parameter.".to_string()))?;

    let start = Instant::now();
    // terms stay out of info logs; this is an anonymizing proxy
    tracing::debug!(%term, plan = %orchestrator.plan(), "searching");

    let results = orchestrator.orchestrate(&term).await?;

    tracing::info!(
        count = results.len(),
        elapsed = ?start.elapsed(),
        "success"
    );
    Ok(Json(results))
}
