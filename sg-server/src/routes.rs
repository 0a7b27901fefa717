use crate::{AppState, admin, api, health};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Provider webhook ingest
        .route("/auth/event", post(api::auth_events::ingest))
        // Session view: snapshot and watch stream
        .route("/session", get(api::session::snapshot))
        .route("/session/watch", get(api::session::watch))
        .route("/session/guest", post(api::guest::set_guest_override))
        .route("/session/registration/reset", post(api::session::reset_registration))
        // Diagnostics
        .route("/debug/journal", get(api::journal::snapshot))
        .route("/metrics", get(api::metrics_endpoint::render))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Admin endpoints
        .route("/admin/shutdown", post(admin::shutdown_handler))
        // Add shared state
        .with_state(state)
        // CORS middleware (session view is consumed cross-origin by UI shells)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
