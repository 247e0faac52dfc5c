use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Retry configuration with linear backoff.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before the attempt that follows failed attempt `attempt_index` (0-based).
    pub fn delay_after(&self, attempt_index: u32) -> Duration {
        self.backoff_unit * (attempt_index + 1)
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Retry with linear backoff. Every error returned by `operation` is treated
/// as transient; the last one is returned once attempts run out.
pub async fn retry_with_backoff<F, T, Fut, E>(
    policy: &RetryPolicy,
    operation_name: &str,
    operation: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff_if(policy, operation_name, |_| true, operation).await
}

/// Like [`retry_with_backoff`], but an error for which `is_transient` is false
/// is returned straight away.
pub async fn retry_with_backoff_if<F, T, Fut, E, P>(
    policy: &RetryPolicy,
    operation_name: &str,
    is_transient: P,
    mut operation: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let attempts = policy.attempts();
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    info!("Operation {} succeeded on attempt {}", operation_name, attempt + 1);
                }
                return Ok(result);
            }
            Err(e) if !is_transient(&e) => {
                error!("Operation {} failed permanently: {}", operation_name, e);
                return Err(e);
            }
            Err(e) => {
                warn!("Operation {} failed on attempt {}: {}", operation_name, attempt + 1, e);

                if attempt + 1 >= attempts {
                    error!("Operation {} failed after {} attempts", operation_name, attempts);
                    return Err(e);
                }

                sleep(policy.delay_after(attempt)).await;
                attempt += 1;
            }
        }
    }
}
