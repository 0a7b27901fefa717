use crate::{ProfileError, ProfileResult, ProfileStore, with_retry};

use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use reqwest::{Client as ReqwestClient, Response, StatusCode};
use serde::Serialize;
use sg_config::{BackendConfig, RetryConfig};
use sg_core::{Identity, Profile};

/// HTTP consumer of the backend profile API.
///
/// `GET /profile` and `POST /register`, with the identity carried in an
/// `X-Identity-Id` header. Fetches retry transient failures; register is
/// issued exactly once per call because the backend does not promise
/// idempotency.
pub struct HttpProfileStore {
    base_url: String,
    retry: RetryConfig,
    client: ReqwestClient,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

impl HttpProfileStore {
    pub fn new(backend: &BackendConfig, retry: RetryConfig) -> ProfileResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(backend.request_timeout_secs))
            .build()
            .map_err(|e| ProfileError::configuration(e.to_string()))?;

        Ok(Self {
            base_url: backend.base_url.trim_end_matches('/').to_string(),
            retry,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response onto the error taxonomy.
    #[track_caller]
    fn classify_failure(identity: &Identity, status: StatusCode) -> ProfileError {
        if status == StatusCode::NOT_FOUND {
            ProfileError::not_found(&identity.id)
        } else if status.is_client_error() {
            ProfileError::Unauthorized {
                status: status.as_u16(),
                location: ErrorLocation::from(Location::caller()),
            }
        } else {
            ProfileError::transient(format!("backend returned status {status}"))
        }
    }

    async fn decode_profile(response: Response) -> ProfileResult<Profile> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            ProfileError::configuration(format!("backend sent an unparseable profile: {e}"))
        })
    }

    async fn fetch_once(&self, identity: &Identity) -> ProfileResult<Profile> {
        let response = self
            .client
            .get(self.url("/profile"))
            .header("X-Identity-Id", &identity.id)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_failure(identity, status));
        }

        Self::decode_profile(response).await
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn fetch(&self, identity: &Identity) -> ProfileResult<Profile> {
        with_retry(&self.retry, "profile fetch", || self.fetch_once(identity)).await
    }

    async fn register(&self, identity: &Identity) -> ProfileResult<Profile> {
        let body = RegisterRequest {
            id: &identity.id,
            email: identity.email.as_deref(),
        };

        let response = self
            .client
            .post(self.url("/register"))
            .header("X-Identity-Id", &identity.id)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_failure(identity, status));
        }

        Self::decode_profile(response).await
    }
}
