//! Fixed-interval retry loop.

use crate::config::RetryConfig;
use crate::error::Error;
use std::fmt::Display;
use std::future::Future;

/// Runs fallible async operations under a [`RetryConfig`].
///
/// Attempts are strictly sequential. After an ordinary failure with budget
/// left, the retrier waits for the configured delay and invokes the operation
/// again. An [`AbortError`](crate::AbortError) ends the session immediately.
/// The error returned on exhaustion is the one from the last attempt.
///
/// A `Retrier` holds no per-session state, so one value can drive any number
/// of concurrent sessions.
///
/// # Examples
///
/// ```rust
/// use reattempt::{Error, Retrier, RetryConfig};
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// # async fn example() -> Result<(), Error<std::io::Error>> {
/// let retrier = Retrier::new(RetryConfig::builder().attempts(5).delay_ms(10).build());
///
/// let calls = &AtomicU32::new(0);
/// let value = retrier
///     .run(|| async move {
///         if calls.fetch_add(1, Ordering::SeqCst) < 2 {
///             return Err(Error::Failed(std::io::Error::other("not yet")));
///         }
///         Ok(42)
///     })
///     .await?;
///
/// assert_eq!(value, 42);
/// assert_eq!(calls.load(Ordering::SeqCst), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Retrier {
    config: RetryConfig,
}

impl Retrier {
    /// Create a retrier for the given configuration.
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// The configuration every session run by this retrier uses.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Run `operation` until it succeeds, aborts, or the budget runs out.
    ///
    /// `operation` is invoked afresh for each attempt and its future is
    /// awaited to completion before anything else happens. The delay starts
    /// once a failure has been observed and is skipped when it is zero, after
    /// the last attempt, and after an abort.
    ///
    /// # Returns
    /// - `Ok(T)`: the first successful result
    /// - `Err(Error::Aborted)`: the abort, on its first occurrence
    /// - `Err(Error::Failed)`: the last attempt's error once the budget is spent
    pub async fn run<F, Fut, T, E>(&self, mut operation: F) -> Result<T, Error<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error<E>>>,
        Error<E>: Display,
    {
        let delay = self.config.delay();
        let mut remaining = self.config.attempts();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_abort() => {
                    tracing::debug!(attempt, error = %err, "operation aborted, not retrying");
                    return Err(err);
                }
                Err(err) if remaining > 1 => {
                    remaining -= 1;
                    tracing::debug!(
                        attempt,
                        remaining,
                        delay_ms = self.config.delay_ms(),
                        error = %err,
                        "attempt failed, retrying"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(err) => {
                    tracing::warn!(attempt, error = %err, "retry budget exhausted");
                    return Err(err);
                }
            }
        }
    }
}

impl From<RetryConfig> for Retrier {
    fn from(config: RetryConfig) -> Self {
        Self::new(config)
    }
}

/// Retry `operation` with the default configuration (3 attempts, 250ms apart).
///
/// # Examples
///
/// ```rust
/// use reattempt::Error;
/// use reattempt::retry::{self, AbortError};
///
/// # async fn example() {
/// let result = retry::retry(|| async {
///     Err::<(), _>(Error::Aborted(AbortError::<std::io::Error>::msg("unrecoverable")))
/// })
/// .await;
///
/// assert_eq!(result.unwrap_err().name(), "AbortError");
/// # }
/// ```
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, Error<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error<E>>>,
    Error<E>: Display,
{
    Retrier::default().run(operation).await
}

/// Retry `operation` with an explicit configuration.
pub async fn retry_with<F, Fut, T, E>(operation: F, config: RetryConfig) -> Result<T, Error<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error<E>>>,
    Error<E>: Display,
{
    Retrier::new(config).run(operation).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abort::AbortError;
    use crate::error::ErrorKind;
    use std::io;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::{Duration, Instant};

    fn fail(message: &str) -> Error<io::Error> {
        Error::Failed(io::Error::other(message.to_string()))
    }

    fn fast(attempts: u32) -> RetryConfig {
        RetryConfig::builder().attempts(attempts).no_delay().build()
    }

    #[tokio::test]
    async fn test_immediate_success() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = Arc::clone(&attempts);

        let result = Retrier::new(fast(3))
            .run(|| {
                let attempts = Arc::clone(&attempts_clone);
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, Error<io::Error>>(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_on_third_attempt() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = Arc::clone(&attempts);

        let result = Retrier::new(fast(5))
            .run(|| {
                let attempts = Arc::clone(&attempts_clone);
                async move {
                    let current = attempts.fetch_add(1, Ordering::SeqCst);
                    if current < 2 {
                        Err(fail("retry me"))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_reports_last_error() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = Arc::clone(&attempts);

        let result = Retrier::new(fast(4))
            .run(|| {
                let attempts = Arc::clone(&attempts_clone);
                async move {
                    let current = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    Err::<(), _>(fail(&format!("failure {current}")))
                }
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Ordinary);
        assert_eq!(err.to_string(), "failure 4");
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_zero_attempts_runs_once() {
        let config: RetryConfig = serde_json::from_str(r#"{"attempts":0,"delay_ms":0}"#).unwrap();
        let mut calls = 0;

        let result = retry_with(
            || {
                calls += 1;
                async { Err::<(), _>(fail("once")) }
            },
            config,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_abort_skips_remaining_budget_and_delay() {
        let config = RetryConfig::builder()
            .attempts(10)
            .delay(Duration::from_secs(30))
            .build();
        let start = Instant::now();

        let result = retry_with(
            || async { Err::<(), _>(Error::Aborted(AbortError::<io::Error>::msg("stop"))) },
            config,
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.is_abort());
        assert_eq!(err.to_string(), "stop");
        assert!(start.elapsed() < Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_no_delay_after_last_attempt() {
        let config = RetryConfig::builder()
            .attempts(1)
            .delay(Duration::from_secs(30))
            .build();
        let start = Instant::now();

        let result = retry_with(|| async { Err::<(), _>(fail("only")) }, config).await;

        assert_eq!(result.unwrap_err().to_string(), "only");
        assert!(start.elapsed() < Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_retrier_is_reusable() {
        let retrier = Retrier::from(fast(2));

        for _ in 0..3 {
            let mut calls = 0;
            let result = retrier
                .run(|| {
                    calls += 1;
                    async { Err::<(), _>(fail("again")) }
                })
                .await;

            assert!(result.is_err());
            assert_eq!(calls, 2);
        }
    }
}
