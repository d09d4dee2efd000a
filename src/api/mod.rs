//! HTTP application wiring.
//!
//! Builds the axum router and defines the shared state injected into
//! handlers. The store is owned by `AppState`, never a global, so each
//! router (and each test) gets its own isolated issue set.

pub mod extract;
mod issues;

use crate::config::ServerConfig;
use crate::storage::IssueStore;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// State shared by all handlers.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub store: Arc<IssueStore>,
}

impl AppState {
    #[must_use]
    pub fn new(store: IssueStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the router for `config`.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            )
        });

    let router = Router::new()
        .route(
            "/api/issues/:project",
            get(issues::list_issues)
                .post(issues::create_issue)
                .put(issues::update_issue)
                .delete(issues::delete_issue),
        )
        .with_state(state)
        .layer(trace_layer);

    if config.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
