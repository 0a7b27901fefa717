use crate::AppState;

use axum::{Json, extract::State};
use sg_session::JournalEntry;

/// GET /debug/journal - read-only dump of the reconciliation trail.
pub async fn snapshot(State(state): State<AppState>) -> Json<Vec<JournalEntry>> {
    Json(state.store.journal().snapshot())
}
