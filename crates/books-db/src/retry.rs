//! Bounded, fixed-delay retry for startup work.

use std::fmt;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// How many times to attempt an operation and how long to wait between
/// failed attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Treated as at least 1.
    pub max_attempts: u32,
    /// Fixed pause after each failed attempt except the last.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(3),
        }
    }
}

/// Returned when every attempt failed.
#[derive(Debug, Error)]
#[error("gave up after {attempts} attempt(s): {last}")]
pub struct RetryError<E: fmt::Display> {
    /// Number of attempts made.
    pub attempts: u32,
    /// The error from the final attempt.
    pub last: E,
}

/// Runs `op` until it succeeds or `policy.max_attempts` is reached.
///
/// `op` receives the 1-based attempt number. The calling thread sleeps for
/// `policy.delay` between failures, so run this off the async executor.
///
/// # Errors
///
/// Returns [`RetryError`] carrying the last failure once attempts are
/// exhausted.
pub fn retry<T, E, F>(policy: &RetryPolicy, mut op: F) -> Result<T, RetryError<E>>
where
    E: fmt::Display,
    F: FnMut(u32) -> Result<T, E>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => {
                tracing::error!(attempt, max_attempts, error = %e, "final attempt failed");
                return Err(RetryError {
                    attempts: attempt,
                    last: e,
                });
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay = ?policy.delay,
                    error = %e,
                    "attempt failed, retrying"
                );
                thread::sleep(policy.delay);
                attempt += 1;
            }
        }
    }
}
