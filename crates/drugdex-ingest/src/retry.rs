//! Bounded retry with a fixed backoff.

use std::thread;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::cancel::CancelToken;
use crate::error::{FetchError, RetryError};

/// How often a backoff sleep looks at the cancel flag.
const CANCEL_POLL: Duration = Duration::from_millis(50);

/// How many times a request is attempted and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy that retries without sleeping.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Duration::ZERO,
        }
    }
}

/// Run `call` until it succeeds, fails with a non-retryable error, the
/// attempt budget is spent, or `cancel` is set.
///
/// Each transient failure is logged before the backoff sleep. A cancellation
/// ends the loop with the last failure; callers check the token before
/// interpreting it.
pub fn with_retry<T, F>(
    policy: &RetryPolicy,
    cancel: &CancelToken,
    operation: &str,
    mut call: F,
) -> Result<T, RetryError>
where
    F: FnMut() -> Result<T, FetchError>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        let error = match call() {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };
        let retry = error.is_retryable() && attempt < max_attempts && !cancel.is_cancelled();
        if retry {
            warn!(
                operation,
                attempt,
                max_attempts,
                error = %error,
                "request failed, retrying"
            );
            pause(policy.backoff, cancel);
        }
        if !retry || cancel.is_cancelled() {
            return Err(RetryError {
                operation: operation.to_string(),
                attempts: attempt,
                last: error,
            });
        }
    }
}

/// Sleep for `backoff`, waking early once `cancel` is set.
fn pause(backoff: Duration, cancel: &CancelToken) {
    let deadline = Instant::now() + backoff;
    while !cancel.is_cancelled() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        thread::sleep(remaining.min(CANCEL_POLL));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable() -> FetchError {
        FetchError::Status {
            status: 503,
            url: "https://example.invalid".to_string(),
        }
    }

    #[test]
    fn default_policy_is_three_attempts_one_second_apart() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff, Duration::from_secs(1));
    }

    #[test]
    fn returns_first_success() {
        let cancel = CancelToken::new();
        let mut calls = 0;
        let result = with_retry(&RetryPolicy::immediate(3), &cancel, "listing", || {
            calls += 1;
            if calls < 2 { Err(unavailable()) } else { Ok(calls) }
        });
        assert_eq!(result.expect("second attempt succeeds"), 2);
        assert_eq!(calls, 2);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let cancel = CancelToken::new();
        let mut calls = 0;
        let result: Result<(), _> = with_retry(&RetryPolicy::immediate(3), &cancel, "listing", || {
            calls += 1;
            Err(unavailable())
        });
        let error = result.expect_err("all attempts fail");
        assert_eq!(calls, 3);
        assert_eq!(error.attempts, 3);
        assert!(error.is_exhausted());
    }

    #[test]
    fn stops_on_non_retryable_error() {
        let cancel = CancelToken::new();
        let mut calls = 0;
        let result: Result<(), _> = with_retry(&RetryPolicy::immediate(3), &cancel, "listing", || {
            calls += 1;
            Err(FetchError::Status {
                status: 404,
                url: "https://example.invalid".to_string(),
            })
        });
        let error = result.expect_err("not found");
        assert_eq!(calls, 1);
        assert!(!error.is_exhausted());
    }

    #[test]
    fn zero_attempts_still_calls_once() {
        let cancel = CancelToken::new();
        let mut calls = 0;
        let _ = with_retry(&RetryPolicy::immediate(0), &cancel, "listing", || {
            calls += 1;
            Ok::<_, FetchError>(())
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn cancellation_stops_retrying() {
        let cancel = CancelToken::new();
        let mut calls = 0;
        let result: Result<(), _> = with_retry(&RetryPolicy::immediate(5), &cancel, "listing", || {
            calls += 1;
            cancel.cancel();
            Err(unavailable())
        });
        let error = result.expect_err("cancelled");
        assert_eq!(calls, 1);
        assert_eq!(error.attempts, 1);
    }

    #[test]
    fn cancellation_cuts_the_backoff_short() {
        let cancel = CancelToken::new();
        let policy = RetryPolicy {
            max_attempts: 2,
            backoff: Duration::from_secs(60),
        };
        let handler = cancel.clone();
        let interrupt = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            handler.cancel();
        });
        let started = Instant::now();
        let result: Result<(), _> = with_retry(&policy, &cancel, "listing", || Err(unavailable()));
        interrupt.join().expect("interrupt thread");

        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
