use serde::{Deserialize, Serialize};

/// Body of the legacy `POST /search`. `term` stays optional so a missing
/// field maps to our own 400 instead of axum's rejection text.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub term: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}
