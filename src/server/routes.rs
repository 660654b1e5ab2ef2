//! Route definitions for the web server.

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::service_info).fallback(handlers::method_not_allowed),
        )
        .route(
            "/no",
            get(handlers::random_reason).fallback(handlers::method_not_allowed),
        )
        .route(
            "/no/",
            get(handlers::random_reason).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        // Added after the fallback so unknown paths are rate limited too
        .layer(from_fn_with_state(
            state.clone(),
            handlers::enforce_rate_limit,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
