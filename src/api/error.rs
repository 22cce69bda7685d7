use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ProviderError;

use super::models::ErrorResponse;

pub const BAD_REQUEST_MESSAGE: &str = "Bad request!";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error!";

/// Every failure a route can surface. The detail is logged, never sent.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::BadRequest(detail) => {
                tracing::error!(%detail, "rejected search request");
                BAD_REQUEST_MESSAGE
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "search failed");
                INTERNAL_ERROR_MESSAGE
            }
        };
        let body = ErrorResponse {
            error: message.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
