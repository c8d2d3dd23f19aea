//! Retry and batching helpers.
//!
//! The client itself never retries. Callers that want it wrap an operation
//! in [`with_retry`]: a bounded number of attempts with a fixed delay.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Delay between attempts.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

/// Run `op` until it succeeds or `max_attempts` is reached.
///
/// `op` receives the 1-based attempt number. The last error is returned.
///
/// # Errors
///
/// Returns the error of the final attempt.
pub async fn with_retry<T, E, F, Fut>(config: &RetryConfig, op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    with_retry_if(config, |_| true, op).await
}

/// Like [`with_retry`], but only errors accepted by `should_retry` are
/// retried; others are returned immediately.
///
/// # Errors
///
/// Returns the first non-retryable error, or the error of the final attempt.
pub async fn with_retry_if<T, E, P, F, Fut>(
    config: &RetryConfig,
    should_retry: P,
    mut op: F,
) -> Result<T, E>
where
    P: Fn(&E) -> bool,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts && should_retry(&e) => {
                tracing::debug!(attempt, max_attempts, delay = ?config.delay, %e, "retrying");
                tokio::time::sleep(config.delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Run `op` over `items` in sequential chunks of `size` (0 is treated as 1).
pub async fn run_in_batches<T, R, F, Fut>(items: Vec<T>, size: usize, mut op: F) -> Vec<R>
where
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = R>,
{
    let size = size.max(1);
    let mut results = Vec::with_capacity(items.len().div_ceil(size));
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        let chunk: Vec<T> = iter.by_ref().take(size).collect();
        results.push(op(chunk).await);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fast() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let result: Result<u32, String> = with_retry(&fast(), |attempt| async move {
            if attempt < 3 {
                Err(format!("attempt {attempt} failed"))
            } else {
                Ok(attempt)
            }
        })
        .await;
        assert_eq!(result, Ok(3));
    }

    #[tokio::test]
    async fn returns_last_error_when_exhausted() {
        let result: Result<(), String> =
            with_retry(&fast(), |attempt| async move { Err(format!("fail {attempt}")) }).await;
        assert_eq!(result, Err("fail 3".to_string()));
    }

    #[tokio::test]
    async fn non_retryable_error_stops_immediately() {
        let mut calls = 0;
        let result: Result<(), String> = with_retry_if(
            &fast(),
            |e: &String| e != "fatal",
            |_| {
                calls += 1;
                async { Err("fatal".to_string()) }
            },
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn zero_attempts_still_runs_once() {
        let config = RetryConfig {
            max_attempts: 0,
            delay: Duration::ZERO,
        };
        let result: Result<u8, String> = with_retry(&config, |_| async { Ok(1) }).await;
        assert_eq!(result, Ok(1));
    }

    #[tokio::test]
    async fn batches_are_sequential_chunks() {
        let sizes = run_in_batches((1..=7).collect::<Vec<_>>(), 3, |chunk| async move {
            chunk.iter().sum::<i32>()
        })
        .await;
        assert_eq!(sizes, vec![6, 15, 7]);
    }

    #[tokio::test]
    async fn zero_batch_size_is_one() {
        let chunks = run_in_batches(vec!['a', 'b'], 0, |chunk| async move { chunk.len() }).await;
        assert_eq!(chunks, vec![1, 1]);
    }
}
