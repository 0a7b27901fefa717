use crate::{AuthEventKind, AuthEventRequest};

use serde_json::json;

#[test]
fn test_signed_in_event_parses_with_identity() {
    let request: AuthEventRequest = serde_json::from_value(json!({
        "kind": "signed_in",
        "identity": { "id": "u1", "email": "u1@example.com" }
    }))
    .unwrap();

    assert_eq!(request.kind, AuthEventKind::SignedIn);
    let identity = request.identity.unwrap();
    assert_eq!(identity.id, "u1");
    assert_eq!(identity.email.as_deref(), Some("u1@example.com"));
}

#[test]
fn test_signed_out_event_parses_without_identity() {
    let request: AuthEventRequest = serde_json::from_value(json!({
        "kind": "signed_out"
    }))
    .unwrap();

    assert_eq!(request.kind, AuthEventKind::SignedOut);
    assert!(request.identity.is_none());
}

#[test]
fn test_unknown_kind_rejected() {
    let result: Result<AuthEventRequest, _> = serde_json::from_value(json!({
        "kind": "password_changed"
    }));

    assert!(result.is_err());
}
