use crate::{ProfileError, with_retry};

use std::sync::atomic::{AtomicU32, Ordering};

use sg_config::RetryConfig;

fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_delay_ms: 1,
        max_delay_secs: 1,
        jitter: false,
    }
}

#[tokio::test]
async fn given_persistent_transient_failure_when_retry_then_gives_up_after_max() {
    let calls = AtomicU32::new(0);

    let result: Result<(), ProfileError> = with_retry(&fast_retry(3), "op", || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(ProfileError::transient("still down"))
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn given_terminal_failure_when_retry_then_fails_immediately() {
    let calls = AtomicU32::new(0);

    let result: Result<(), ProfileError> = with_retry(&fast_retry(5), "op", || async {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(ProfileError::not_found("u1"))
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_recovery_when_retry_then_returns_success() {
    let calls = AtomicU32::new(0);

    let result = with_retry(&fast_retry(3), "op", || async {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(ProfileError::transient("blip"))
        } else {
            Ok(42)
        }
    })
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
