use crate::AppState;

use axum::{extract::State, http::StatusCode, response::IntoResponse};

/// GET /metrics - Prometheus exposition of the engine's counters.
pub async fn render(State(state): State<AppState>) -> impl IntoResponse {
    match &state.prometheus {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, String::from("metrics disabled")),
    }
}
