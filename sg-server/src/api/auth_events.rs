use crate::AppState;
use crate::api::auth_event_request::{AuthEventKind, AuthEventRequest};
use crate::api::error::ApiError;

use axum::{Json, extract::State};
use log::debug;
use serde_json::{Value, json};
use sg_core::Identity;
use sg_session::JournalEventKind;

/// POST /auth/event - webhook ingest from the identity provider.
///
/// Malformed provider input is journaled and rejected here, at the
/// boundary; the engine itself only ever sees well-formed identities.
pub async fn ingest(
    State(state): State<AppState>,
    Json(request): Json<AuthEventRequest>,
) -> Result<Json<Value>, ApiError> {
    match request.kind {
        AuthEventKind::SignedIn => {
            let dto = request.identity.ok_or_else(|| {
                state.store.journal().record(
                    JournalEventKind::ProviderError,
                    "signed_in event without identity",
                );
                ApiError::validation("signed_in event requires an identity", Some("identity"))
            })?;

            let identity = Identity::new(&dto.id, dto.email.as_deref()).map_err(|e| {
                state
                    .store
                    .journal()
                    .record(JournalEventKind::ProviderError, e.to_string());
                ApiError::validation(e.to_string(), Some("identity.id"))
            })?;

            debug!("Provider sign-in for identity {identity}");
            state.source.emit(Some(identity));
        }
        AuthEventKind::SignedOut => {
            debug!("Provider sign-out");
            state.source.emit(None);
        }
        AuthEventKind::TokenRefreshed => match state.source.current() {
            Some(current) => {
                // A refresh replaces the identity wholesale, with a fresh
                // issued-at marker; nothing is patched in place
                let refreshed = Identity::new(&current.id, current.email.as_deref())
                    .map_err(|e| ApiError::validation(e.to_string(), Some("identity.id")))?;
                debug!("Provider token refresh for identity {refreshed}");
                state.source.emit(Some(refreshed));
            }
            None => {
                state.store.journal().record(
                    JournalEventKind::ProviderError,
                    "token refresh with no current identity",
                );
            }
        },
    }

    Ok(Json(json!({ "accepted": true })))
}
