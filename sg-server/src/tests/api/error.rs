use crate::ApiError;

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::validation("identity id must not be empty", Some("identity.id"));
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "identity.id");
    assert_eq!(json["error"]["message"], "identity id must not be empty");
}

#[tokio::test]
async fn test_validation_error_without_field_omits_it() {
    let error = ApiError::validation("bad payload", None);
    let response = error.into_response();

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(json["error"].get("field").is_none());
}
