//! Router assembly.

use axum::routing::{delete, get, post};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers;
use super::state::AppState;
use crate::auth::auth_middleware;
use crate::ws;

/// Build the full application router.
///
/// Routes needing a verified principal sit behind the auth middleware;
/// everything else (liveness, report download, report generation, the
/// live feed) is open.
pub fn create_router(state: AppState) -> Router {
    let auth_state = state.auth.clone();

    let protected = Router::new()
        .route(
            "/test-data/",
            post(handlers::create_test_record).get(handlers::list_test_records),
        )
        .route("/test-data/{id}", delete(handlers::delete_test_record))
        .route("/logs/", get(handlers::list_audit_logs))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let public = Router::new()
        .route("/", get(handlers::home))
        .route("/test-data/report", get(handlers::test_report))
        .route("/reports/", post(handlers::generate_report))
        .route("/ws/test-data", get(ws::feed_handler));

    protected
        .merge(public)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
