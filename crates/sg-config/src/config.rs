use crate::{
    BackendConfig, ConfigError, ConfigErrorResult, GuestConfig, LoggingConfig, RegistrationConfig,
    RetryConfig, ServerConfig,
};

use std::path::PathBuf;
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub retry: RetryConfig,
    pub registration: RegistrationConfig,
    pub guest: GuestConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for SG_CONFIG_DIR env var, else use ./.sg/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply SG_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: SG_CONFIG_DIR env var > ./.sg/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("SG_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".sg"))
    }

    /// Apply SG_* environment variable overrides on top of file values.
    fn apply_env_overrides(&mut self) -> ConfigErrorResult<()> {
        if let Ok(host) = std::env::var("SG_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("SG_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::server(format!("SG_PORT is not a port: '{port}'")))?;
        }

        if let Ok(url) = std::env::var("SG_BACKEND_URL") {
            self.backend.base_url = url;
        }

        if let Ok(secs) = std::env::var("SG_REGISTRATION_TIMEOUT_SECS") {
            self.registration.timeout_secs = secs.parse().map_err(|_| {
                ConfigError::registration(format!(
                    "SG_REGISTRATION_TIMEOUT_SECS is not a number: '{secs}'"
                ))
            })?;
        }

        if let Ok(level) = std::env::var("SG_LOG_LEVEL") {
            self.logging.level =
                crate::LogLevel::from_str(&level).map_err(ConfigError::logging)?;
        }

        Ok(())
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.backend.validate()?;
        self.retry.validate()?;
        self.registration.validate()?;
        self.guest.validate()?;
        Ok(())
    }

    /// Get absolute path to the guest persistence file.
    pub fn guest_store_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.guest.file))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log the effective settings at startup.
    pub fn log_summary(&self) {
        info!("Config: listening on {}", self.bind_addr());
        info!("Config: profile backend at {}", self.backend.base_url);
        info!(
            "Config: registration timeout {}s, settle delay {}ms",
            self.registration.timeout_secs, self.registration.settle_delay_ms
        );
    }
}
