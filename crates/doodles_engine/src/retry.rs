//! Fixed-delay retry policy and the combinator that consumes it.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use doodles_logging::{doodles_debug, doodles_warn};

/// Bounded retry with a constant delay between attempts. No growth, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Pause between two consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            delay: Duration::from_millis(7500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Attempts actually made; a zero budget still runs once.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Whether another attempt follows a failure of `attempt` (1-based).
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.attempts()
    }
}

/// Suspension between attempts. Abstracted so tests can observe delays without sleeping.
#[async_trait::async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait::async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("gave up after {attempts} attempt(s): {last}")]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last: E,
}

/// Runs `op` until it succeeds or `policy` runs out of attempts.
///
/// `op` receives the 1-based attempt number. Every failure is logged with
/// `label`; the last one is returned inside [`RetryExhausted`].
pub async fn retry_with_policy<T, E, F, Fut>(
    policy: &RetryPolicy,
    delay: &dyn Delay,
    label: &str,
    mut op: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let max = policy.attempts();
    let mut attempt = 1u32;
    loop {
        match op(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    doodles_debug!("{} succeeded on attempt {}/{}", label, attempt, max);
                }
                return Ok(value);
            }
            Err(err) => {
                doodles_warn!("Attempt {}/{}: {} failed: {}", attempt, max, label, err);
                if !policy.should_retry(attempt) {
                    return Err(RetryExhausted {
                        attempts: attempt,
                        last: err,
                    });
                }
                delay.wait(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
