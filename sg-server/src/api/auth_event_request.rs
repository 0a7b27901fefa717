use serde::Deserialize;

/// Normalized event shape pushed by the identity provider's webhook.
#[derive(Debug, Deserialize)]
pub struct AuthEventRequest {
    pub kind: AuthEventKind,
    /// Present for `signed_in`; ignored otherwise.
    pub identity: Option<AuthIdentityDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventKind {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

#[derive(Debug, Deserialize)]
pub struct AuthIdentityDto {
    pub id: String,
    pub email: Option<String>,
}
