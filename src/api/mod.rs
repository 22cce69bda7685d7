use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::orchestrator::SearchOrchestrator;
use crate::provider::SearchProvider;

pub mod error;
pub mod handlers;
pub mod models;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    /// Behind `/current/search`.
    pub current: Arc<SearchOrchestrator>,
    /// Behind the legacy `/search` routes.
    pub legacy: Arc<SearchOrchestrator>,
}

impl AppState {
    pub fn new(current: SearchOrchestrator, legacy: SearchOrchestrator) -> Self {
        Self {
            current: Arc::new(current),
            legacy: Arc::new(legacy),
        }
    }

    /// Both orchestrators share the one provider.
    pub fn from_config(provider: Arc<dyn SearchProvider>, config: &Config) -> Self {
        Self::new(
            SearchOrchestrator::new(provider.clone(), config.plan()),
            SearchOrchestrator::new(provider, config.legacy_plan()),
        )
    }
}

pub fn create_router(state: AppState, legacy_routes: bool) -> Router {
    // The overlay runs in a webview with its own origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/current/search", get(handlers::missing_term_handler))
        .route("/current/search/", get(handlers::missing_term_handler))
        .route("/current/search/:term", get(handlers::current_search_handler));

    if legacy_routes {
        router = router
            .route(
                "/search",
                post(handlers::legacy_post_handler).get(handlers::missing_term_handler),
            )
            .route("/search/", get(handlers::missing_term_handler))
            .route("/search/:term", get(handlers::legacy_get_handler));
    }

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
