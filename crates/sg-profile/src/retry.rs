use std::time::Duration;

use sg_config::RetryConfig;
use tokio::time::sleep;

/// Trait for errors that can indicate retryability
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for crate::ProfileError {
    fn is_retryable(&self) -> bool {
        self.is_retryable()
    }
}

/// Execute an async operation with bounded exponential backoff.
///
/// Only use this for idempotent operations: a retried call must be safe
/// to land twice on the server.
pub async fn with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + IsRetryable,
{
    let max_delay = Duration::from_secs(config.max_delay_secs);
    let mut delay = Duration::from_millis(config.initial_delay_ms);
    let mut attempts = 0;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => {
                if attempts > 1 {
                    log::info!("{} succeeded after {} attempts", operation_name, attempts);
                }
                return Ok(result);
            }
            Err(e) => {
                if !e.is_retryable() || attempts >= config.max_attempts {
                    log::warn!(
                        "{} failed after {} attempts: {}",
                        operation_name,
                        attempts,
                        e
                    );
                    return Err(e);
                }

                // Jitter spreads simultaneous clients over 0.5x-1.5x the
                // nominal delay
                let actual_delay = if config.jitter {
                    let jitter_factor = 0.5 + rand::random::<f64>();
                    Duration::from_secs_f64(delay.as_secs_f64() * jitter_factor)
                } else {
                    delay
                };

                log::debug!(
                    "{} attempt {} failed: {}. Retrying in {:?}",
                    operation_name,
                    attempts,
                    e,
                    actual_delay
                );

                sleep(actual_delay).await;

                delay = Duration::from_secs_f64(
                    (delay.as_secs_f64() * 2.0).min(max_delay.as_secs_f64()),
                );
            }
        }
    }
}
