mod backend_config;
mod config;
mod error;
mod guest_config;
mod logging_config;
mod registration_config;
mod retry_config;
mod server_config;

#[cfg(test)]
mod tests;

pub use backend_config::BackendConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use guest_config::GuestConfig;
pub use logging_config::{LogLevel, LoggingConfig};
pub use registration_config::RegistrationConfig;
pub use retry_config::RetryConfig;
pub use server_config::ServerConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8600;
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8700";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_INITIAL_DELAY_MS: u64 = 100;
const DEFAULT_RETRY_MAX_DELAY_SECS: u64 = 5;
const DEFAULT_RETRY_JITTER: bool = true;
const DEFAULT_REGISTRATION_TIMEOUT_SECS: u64 = 15;
const DEFAULT_SETTLE_DELAY_MS: u64 = 250;
const DEFAULT_JOURNAL_CAPACITY: usize = 256;
const DEFAULT_GUEST_FILE: &str = "guest.json";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
