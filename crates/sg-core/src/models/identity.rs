use crate::{CoreError, CoreResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// The external provider's notion of "who is signed in".
///
/// Immutable once received: a new provider event replaces the identity
/// wholesale, it never patches fields on an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
    pub issued_at: DateTime<Utc>,
}

impl Identity {
    #[track_caller]
    pub fn new(id: &str, email: Option<&str>) -> CoreResult<Self> {
        if id.trim().is_empty() {
            return Err(CoreError::Validation {
                message: "identity id must not be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            id: id.to_string(),
            email: email.map(String::from),
            issued_at: Utc::now(),
        })
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
