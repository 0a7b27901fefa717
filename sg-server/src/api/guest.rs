use crate::AppState;

use axum::{Json, extract::State};
use log::info;
use serde::Deserialize;
use serde_json::{Value, json};
use sg_core::Profile;

/// Body of POST /session/guest. A null profile clears the override.
#[derive(Debug, Deserialize)]
pub struct GuestOverrideRequest {
    pub profile: Option<Profile>,
}

/// POST /session/guest - set or clear the guest/demo override.
pub async fn set_guest_override(
    State(state): State<AppState>,
    Json(request): Json<GuestOverrideRequest>,
) -> Json<Value> {
    match &request.profile {
        Some(profile) => info!("Guest override requested for {}", profile.id),
        None => info!("Guest override clear requested"),
    }

    state.store.set_guest_override(request.profile).await;

    Json(json!({ "accepted": true }))
}
