//! Bounded retry with exponential backoff for transient API failures.

use std::time::Duration;

use log::{debug, warn};
use rand::Rng;

use super::dispatch::{Dispatch, RawResponse, RequestDescriptor};
use super::normalize::classify_failure;
use crate::error::{CongressApiError, ErrorKind};

/// How a logical call is retried: total attempt budget and backoff shape.
///
/// Only rate-limit (429) and server (5xx) failures are retried; everything
/// else surfaces on the first attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before retry attempt `attempt` (1-indexed, so the first retry is
    /// attempt 2): `base * 2^(attempt - 2)` with a ±20% jitter spread, capped
    /// at `max_delay`. A Retry-After hint from the remote takes precedence
    /// over the computed delay and is not jittered.
    pub fn delay_before(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(hint) = retry_after {
            return hint.min(self.max_delay);
        }
        let shift = attempt.saturating_sub(2).min(20);
        let computed = self
            .base_delay
            .saturating_mul(1_u32 << shift)
            .min(self.max_delay);
        jitter(computed)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // 3 total attempts, i.e. up to 2 retries.
        Self::new(3, Duration::from_millis(500), Duration::from_secs(30))
    }
}

/// ±20% spread so synchronized callers do not retry in lockstep.
fn jitter(delay: Duration) -> Duration {
    let factor: f64 = rand::rng().random_range(0.8..=1.2);
    delay.mul_f64(factor)
}

/// Drives one logical call through the dispatcher, retrying transient
/// failures within the policy's attempt budget.
///
/// Each failure is classified once; non-retryable errors and the last error
/// after exhaustion are surfaced unchanged. The backoff sleep suspends only
/// this call, never other in-flight calls.
pub async fn execute<D: Dispatch + ?Sized>(
    dispatch: &D,
    policy: &RetryPolicy,
    descriptor: &RequestDescriptor,
) -> Result<RawResponse, CongressApiError> {
    let mut last_error: Option<CongressApiError> = None;

    for attempt in 1..=policy.max_attempts() {
        match dispatch.send(descriptor).await {
            Ok(response) => {
                if attempt > 1 {
                    debug!("GET {}: succeeded on attempt {}", descriptor.path, attempt);
                }
                return Ok(response);
            }
            Err(raw_failure) => {
                let error = classify_failure(&raw_failure);

                if !error.retryable {
                    debug!("GET {}: non-retryable error: {}", descriptor.path, error);
                    return Err(error);
                }

                if attempt < policy.max_attempts() {
                    let delay = policy.delay_before(attempt + 1, raw_failure.retry_after);
                    warn!(
                        "GET {}: attempt {}/{} failed ({}), retrying in {}ms...",
                        descriptor.path,
                        attempt,
                        policy.max_attempts(),
                        error,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                last_error = Some(error);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        CongressApiError::new(
            ErrorKind::UnknownError,
            None,
            format!(
                "GET {} failed after {} attempts",
                descriptor.path,
                policy.max_attempts()
            ),
            None,
        )
    }))
}
