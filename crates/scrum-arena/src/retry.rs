//! Bounded exponential backoff for storage access.

use crate::storage::StorageError;
use std::time::Duration;

/// How often and how patiently to retry a failing storage operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. At least 1.
    pub max_attempts: u32,
    /// Delay after the first failure; doubled after each further failure.
    pub base_delay: Duration,
    /// Cap for any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Runs `op` until it succeeds, fails permanently, or the policy's attempts
/// are used up.
///
/// Only [transient](StorageError::is_transient) errors are retried. Once the
/// attempts run out the last error is wrapped in
/// [`StorageError::Unavailable`].
pub async fn with_backoff<T, F>(policy: &RetryPolicy, mut op: F) -> Result<T, StorageError>
where
    F: FnMut() -> Result<T, StorageError>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_transient() => return Err(e),
            Err(e) if attempt >= max_attempts => {
                return Err(StorageError::Unavailable {
                    attempts: attempt,
                    source: Box::new(e),
                });
            }
            Err(e) => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(attempt, ?delay, "storage busy, retrying: {}", e);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    fn busy() -> StorageError {
        StorageError::Sqlite(rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_BUSY),
            None,
        ))
    }

    fn quick(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn test_delay_doubles_up_to_cap() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1000),
        };
        assert_eq!(policy.delay_after(1), Duration::from_millis(100));
        assert_eq!(policy.delay_after(2), Duration::from_millis(200));
        assert_eq!(policy.delay_after(4), Duration::from_millis(800));
        assert_eq!(policy.delay_after(5), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(40), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let mut calls = 0;
        let result = with_backoff(&quick(5), || {
            calls += 1;
            if calls < 3 {
                Err(busy())
            } else {
                Ok(calls)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let mut calls = 0;
        let result: Result<(), _> = with_backoff(&quick(4), || {
            calls += 1;
            Err(busy())
        })
        .await;

        assert_eq!(calls, 4);
        match result {
            Err(StorageError::Unavailable { attempts, source }) => {
                assert_eq!(attempts, 4);
                assert!(source.is_transient());
            }
            other => panic!("Expected Unavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let mut calls = 0;
        let result: Result<(), _> = with_backoff(&quick(5), || {
            calls += 1;
            Err(StorageError::Poisoned)
        })
        .await;

        assert_eq!(calls, 1);
        assert!(matches!(result, Err(StorageError::Poisoned)));
    }

    #[tokio::test]
    async fn test_zero_attempts_still_runs_once() {
        let mut calls = 0;
        let result = with_backoff(&quick(0), || {
            calls += 1;
            Ok::<_, StorageError>(())
        })
        .await;
        assert!(result.is_ok());
        assert_eq!(calls, 1);
    }
}
