#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use sg_config::{BackendConfig, RegistrationConfig, RetryConfig};
use sg_profile::{FileGuestStore, HttpProfileStore};
use sg_server::{AppState, build_router};
use sg_session::{ChannelIdentitySource, SessionStore};
use tempfile::TempDir;

/// Gateway wired against a real (mock) HTTP backend, with fast timings
/// so integration tests settle quickly.
pub struct GatewayHarness {
    pub server: TestServer,
    pub store: SessionStore,
    pub source: ChannelIdentitySource,
    guest_dir: TempDir,
}

pub fn gateway_for(backend_url: &str) -> GatewayHarness {
    let backend = BackendConfig {
        base_url: backend_url.to_string(),
        request_timeout_secs: 2,
    };
    let retry = RetryConfig {
        max_attempts: 2,
        initial_delay_ms: 5,
        max_delay_secs: 1,
        jitter: false,
    };
    let registration = RegistrationConfig {
        timeout_secs: 2,
        settle_delay_ms: 1,
        journal_capacity: 64,
    };

    let guest_dir = TempDir::new().expect("temp dir");
    let profiles = Arc::new(HttpProfileStore::new(&backend, retry).expect("profile store"));
    let guests = Arc::new(FileGuestStore::new(guest_dir.path().join("guest.json")));

    let source = ChannelIdentitySource::new();
    let store = SessionStore::spawn(
        &registration,
        Arc::new(source.clone()),
        profiles,
        guests,
    );

    let state = AppState {
        store: store.clone(),
        source: source.clone(),
        shutdown: store.shutdown_coordinator(),
        prometheus: None,
    };

    let server = TestServer::builder()
        .http_transport()
        .build(build_router(state))
        .expect("test server");

    GatewayHarness {
        server,
        store,
        source,
        guest_dir,
    }
}

/// Poll GET /session until the view satisfies the predicate.
pub async fn wait_for_session(
    server: &TestServer,
    predicate: impl Fn(&serde_json::Value) -> bool,
) -> serde_json::Value {
    for _ in 0..200 {
        let view: serde_json::Value = server.get("/session").await.json();
        if predicate(&view) {
            return view;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }

    panic!("session view never satisfied predicate");
}
