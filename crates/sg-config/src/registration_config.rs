use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_JOURNAL_CAPACITY, DEFAULT_REGISTRATION_TIMEOUT_SECS,
    DEFAULT_SETTLE_DELAY_MS,
};

use serde::Deserialize;

/// Bounds on a reconcile attempt.
///
/// `settle_delay_ms` is the deliberate pause between an identity arriving
/// and the profile fetch being issued, so rapid provider re-emissions
/// supersede each other before any network traffic happens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    pub timeout_secs: u64,
    pub settle_delay_ms: u64,
    pub journal_capacity: usize,
}

impl RegistrationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::registration(
                "registration.timeout_secs must be at least 1",
            ));
        }

        if self.journal_capacity < 16 {
            return Err(ConfigError::registration(
                "registration.journal_capacity must be at least 16",
            ));
        }

        Ok(())
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_REGISTRATION_TIMEOUT_SECS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
        }
    }
}
