use crate::ProfileResult;

use async_trait::async_trait;
use sg_core::{Identity, Profile};

/// Read/write access to the backend-owned profile record.
///
/// `register` is not required to be idempotent; callers must guard
/// against issuing overlapping registrations for the same identity.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for an identity. A missing record resolves to
    /// `ProfileError::NotFound`, which callers treat as "register me",
    /// not as a failure.
    async fn fetch(&self, identity: &Identity) -> ProfileResult<Profile>;

    /// Create the profile record for a first-time identity.
    async fn register(&self, identity: &Identity) -> ProfileResult<Profile>;
}
