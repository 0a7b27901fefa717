use crate::AppState;

use axum::{
    Json,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
};
use futures::{Sink, SinkExt, StreamExt};
use log::debug;
use sg_core::SessionView;
use tracing::{Instrument, info_span};

/// GET /session - current merged view as a JSON snapshot.
pub async fn snapshot(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.store.view())
}

/// POST /session/registration/reset - clear the terminal-failure latch
/// and retry reconciliation for the current identity.
pub async fn reset_registration(State(state): State<AppState>) -> StatusCode {
    state.store.reset_registration().await;
    StatusCode::ACCEPTED
}

/// GET /session/watch - WebSocket push stream of the session view.
///
/// Sends the current view on connect and every change after it, until
/// the client goes away or the server shuts down.
pub async fn watch(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| stream_views(socket, state).instrument(info_span!("session_watch")))
}

async fn stream_views(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let mut views = state.store.subscribe();
    let mut guard = state.shutdown.subscribe_guard();

    // Deliver the current view before any change arrives
    let initial = views.borrow_and_update().clone();
    if send_view(&mut sink, &initial).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            _ = guard.wait() => {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }
            changed = views.changed() => {
                if changed.is_err() {
                    // Engine is gone; nothing further to stream
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
                let view = views.borrow_and_update().clone();
                if send_view(&mut sink, &view).await.is_err() {
                    break;
                }
            }
            message = stream.next() => match message {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Watchers only listen; anything else is ignored
                Some(Ok(_)) => {}
            }
        }
    }

    debug!("Session watch stream closed");
}

async fn send_view(
    sink: &mut (impl Sink<Message, Error = axum::Error> + Unpin),
    view: &SessionView,
) -> Result<(), axum::Error> {
    let payload = serde_json::to_string(view)
        .map_err(|e| axum::Error::new(std::io::Error::other(e)))?;
    sink.send(Message::Text(payload.into())).await
}
