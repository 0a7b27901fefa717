use crate::{ConfigError, ConfigErrorResult, DEFAULT_GUEST_FILE};

use serde::Deserialize;

/// Where the guest-override profile is persisted, relative to the config
/// directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuestConfig {
    pub file: String,
}

impl GuestConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let path = std::path::Path::new(&self.file);
        if path.is_absolute() || self.file.contains("..") {
            return Err(ConfigError::guest(
                "guest.file must be relative and cannot contain '..'",
            ));
        }
        Ok(())
    }
}

impl Default for GuestConfig {
    fn default() -> Self {
        Self {
            file: String::from(DEFAULT_GUEST_FILE),
        }
    }
}
