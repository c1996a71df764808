use rand::Rng;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use crate::error::{quotes_unavailable_error, Error};

/// Delay to wait before retry number `retry` (starting at 1).
pub trait Backoff: Debug + Send + Sync {
    fn delay(&self, retry: u32) -> Duration;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Immediate;

impl Backoff for Immediate {
    fn delay(&self, _retry: u32) -> Duration {
        Duration::ZERO
    }
}

/// Doubles `base` each retry, capped at `max`, with ±25% jitter.
#[derive(Clone, Copy, Debug)]
pub struct ExponentialBackoff {
    pub base: Duration,
    pub max: Duration,
}

impl ExponentialBackoff {
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            max: Duration::from_secs(30),
        }
    }
}

impl Backoff for ExponentialBackoff {
    fn delay(&self, retry: u32) -> Duration {
        let factor = 1u32 << retry.saturating_sub(1).min(10);
        let capped = self.base.saturating_mul(factor).min(self.max);

        capped.mul_f64(rand::thread_rng().gen_range(0.75..1.25))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attempt {
    Attempting(u32),
    Succeeded,
    Failed,
}

impl Attempt {
    pub fn next<T>(self, result: &Result<T, Error>, max_retries: u32) -> Self {
        match (self, result) {
            (Self::Attempting(_), Ok(_)) => Self::Succeeded,
            (Self::Attempting(n), Err(err)) if err.is_retryable() && n < max_retries => {
                Self::Attempting(n + 1)
            }
            (Self::Attempting(_), Err(_)) => Self::Failed,
            (state, _) => state,
        }
    }
}

/// Runs `operation` until it succeeds or `max_retries` retries have failed.
/// Attempts never overlap. Exhausting the retries yields `QuotesUnavailable`;
/// a non-retryable error is returned as is.
pub async fn with_retries<T, F, Fut>(
    max_retries: u32,
    backoff: &dyn Backoff,
    mut operation: F,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let mut state = Attempt::Attempting(0);
    let mut attempts = 0;

    loop {
        let result = operation().await;
        attempts += 1;
        state = state.next(&result, max_retries);

        let err = match result {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        match state {
            Attempt::Attempting(retry) => {
                let delay = backoff.delay(retry);
                tracing::warn!(
                    retry,
                    max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "quote request failed, retrying"
                );

                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            _ if err.is_retryable() => {
                tracing::error!(attempts, error = %err, "quote request failed, retries exhausted");
                return Err(quotes_unavailable_error(attempts));
            }
            _ => return Err(err),
        }
    }
}
