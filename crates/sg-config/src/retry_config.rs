use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_RETRY_INITIAL_DELAY_MS, DEFAULT_RETRY_JITTER,
    DEFAULT_RETRY_MAX_ATTEMPTS, DEFAULT_RETRY_MAX_DELAY_SECS,
};

use serde::Deserialize;

/// Backoff policy for transient failures on idempotent backend reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_secs: u64,
    pub jitter: bool,
}

impl RetryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_attempts == 0 {
            return Err(ConfigError::config("retry.max_attempts must be at least 1"));
        }

        if self.initial_delay_ms == 0 {
            return Err(ConfigError::config(
                "retry.initial_delay_ms must be at least 1",
            ));
        }

        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            initial_delay_ms: DEFAULT_RETRY_INITIAL_DELAY_MS,
            max_delay_secs: DEFAULT_RETRY_MAX_DELAY_SECS,
            jitter: DEFAULT_RETRY_JITTER,
        }
    }
}
