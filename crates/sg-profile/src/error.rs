use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("No profile exists for identity {identity_id} {location}")]
    NotFound {
        identity_id: String,
        location: ErrorLocation,
    },

    #[error("Backend rejected the request with status {status} {location}")]
    Unauthorized { status: u16, location: ErrorLocation },

    #[error("Transient backend failure: {message} {location}")]
    Transient {
        message: String,
        location: ErrorLocation,
    },

    #[error("Backend request timed out {location}")]
    Timeout { location: ErrorLocation },

    #[error("Backend misconfigured: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Guest storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProfileError {
    /// Transient and timeout failures may be retried; everything else is
    /// final for the identity that produced it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. } | Self::Timeout { .. })
    }

    /// Terminal errors stop further attempts for the current identity.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Unauthorized { .. } | Self::Configuration { .. }
        )
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(identity_id: S) -> Self {
        Self::NotFound {
            identity_id: identity_id.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized(status: u16) -> Self {
        Self::Unauthorized {
            status,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn transient<S: Into<String>>(message: S) -> Self {
        Self::Transient {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ProfileError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                location: ErrorLocation::from(Location::caller()),
            }
        } else {
            Self::Transient {
                message: source.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        }
    }
}

pub type ProfileResult<T> = std::result::Result<T, ProfileError>;
