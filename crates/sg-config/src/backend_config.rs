use crate::{ConfigError, ConfigErrorResult, DEFAULT_BACKEND_URL, DEFAULT_REQUEST_TIMEOUT_SECS};

use serde::Deserialize;

/// Where the consumed profile API lives and how long a single request
/// may take.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::backend(format!(
                "backend.base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::backend(
                "backend.request_timeout_secs must be at least 1",
            ));
        }

        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BACKEND_URL),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
