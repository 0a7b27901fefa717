//! Administrative endpoints for server management.

use crate::AppState;

use axum::{extract::State, http::StatusCode};
use log::info;

/// Graceful shutdown endpoint.
///
/// Triggers the shared shutdown coordinator; the serve loop and the
/// session engine drain and stop.
pub async fn shutdown_handler(State(state): State<AppState>) -> StatusCode {
    info!("Graceful shutdown requested via HTTP");
    state.shutdown.shutdown();
    StatusCode::ACCEPTED
}
