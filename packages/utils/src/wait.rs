//! Bounded polling for asynchronous UI state.
//!
//! Every wait in the page objects goes through [`wait_for_with_retry`]: check a
//! condition, run a side effect (refresh the page, re-sync a provider) when it
//! does not hold yet, sleep, and try again until the timeout elapses. A timeout
//! is reported as [`WaitOutcome::TimedOut`], never as an error; errors raised by
//! the condition or the side effect propagate unchanged.

use anyhow::Result;
use std::future::Future;
use tokio::time::{sleep, Duration, Instant};

const DEFAULT_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub delay: Duration,
    /// Description used in log lines
    pub message: String,
}

impl WaitOptions {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            message: "wait_for".to_string(),
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Result of a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Reached { elapsed: Duration, attempts: usize },
    TimedOut { elapsed: Duration, attempts: usize },
}

impl WaitOutcome {
    pub fn is_reached(&self) -> bool {
        matches!(self, WaitOutcome::Reached { .. })
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, WaitOutcome::TimedOut { .. })
    }

    pub fn elapsed(&self) -> Duration {
        match self {
            WaitOutcome::Reached { elapsed, .. } | WaitOutcome::TimedOut { elapsed, .. } => {
                *elapsed
            }
        }
    }

    pub fn attempts(&self) -> usize {
        match self {
            WaitOutcome::Reached { attempts, .. } | WaitOutcome::TimedOut { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Poll `condition` until it returns `true` or `options.timeout` elapses.
pub async fn wait_for<C, CF>(condition: C, options: &WaitOptions) -> Result<WaitOutcome>
where
    C: FnMut() -> CF,
    CF: Future<Output = Result<bool>>,
{
    wait_for_with_retry(condition, || async { Ok::<(), anyhow::Error>(()) }, options).await
}

/// Poll `condition`, running `on_retry` before every sleep between attempts.
pub async fn wait_for_with_retry<C, CF, R, RF>(
    mut condition: C,
    mut on_retry: R,
    options: &WaitOptions,
) -> Result<WaitOutcome>
where
    C: FnMut() -> CF,
    CF: Future<Output = Result<bool>>,
    R: FnMut() -> RF,
    RF: Future<Output = Result<()>>,
{
    let start = Instant::now();
    let mut attempts = 0;

    loop {
        attempts += 1;
        if condition().await? {
            let elapsed = start.elapsed();
            log::info!(
                "✅ {} ({} attempt(s), {:.1}s)",
                options.message,
                attempts,
                elapsed.as_secs_f64()
            );
            return Ok(WaitOutcome::Reached { elapsed, attempts });
        }

        let elapsed = start.elapsed();
        if elapsed >= options.timeout {
            log::warn!(
                "Timeout: {} (waited {:.1}s, {} attempt(s))",
                options.message,
                elapsed.as_secs_f64(),
                attempts
            );
            return Ok(WaitOutcome::TimedOut { elapsed, attempts });
        }

        log::debug!("{}: attempt {} failed, retrying...", options.message, attempts);
        on_retry().await?;
        sleep(options.delay.min(options.timeout - elapsed)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;

    fn quick(timeout_ms: u64) -> WaitOptions {
        WaitOptions::new(Duration::from_millis(timeout_ms))
            .delay(Duration::from_millis(5))
            .message("test wait")
    }

    #[test]
    fn test_reached_on_first_attempt() -> Result<()> {
        let outcome = tokio_test::block_on(wait_for(
            || async { Ok::<_, anyhow::Error>(true) },
            &quick(100),
        ))?;
        assert!(outcome.is_reached());
        assert_eq!(outcome.attempts(), 1);
        Ok(())
    }

    #[test]
    fn test_retry_side_effect_runs_between_attempts() -> Result<()> {
        let refreshes = Cell::new(0usize);

        let outcome = tokio_test::block_on(wait_for_with_retry(
            || {
                let seen = refreshes.get();
                async move { Ok::<_, anyhow::Error>(seen >= 3) }
            },
            || {
                refreshes.set(refreshes.get() + 1);
                async { Ok::<_, anyhow::Error>(()) }
            },
            &quick(2_000),
        ))?;

        assert!(outcome.is_reached());
        assert_eq!(outcome.attempts(), 4);
        assert_eq!(refreshes.get(), 3);
        Ok(())
    }

    #[test]
    fn test_timeout_is_not_an_error() -> Result<()> {
        let outcome = tokio_test::block_on(wait_for(
            || async { Ok::<_, anyhow::Error>(false) },
            &quick(30),
        ))?;
        assert!(outcome.is_timed_out());
        assert!(outcome.attempts() > 1);
        assert!(outcome.elapsed() >= Duration::from_millis(30));
        Ok(())
    }

    #[test]
    fn test_condition_error_propagates() {
        let result = tokio_test::block_on(wait_for(
            || async { Err::<bool, _>(anyhow!("stale element")) },
            &quick(100),
        ));
        assert!(result.is_err());
    }

    #[test]
    fn test_retry_error_propagates() {
        let result = tokio_test::block_on(wait_for_with_retry(
            || async { Ok::<_, anyhow::Error>(false) },
            || async { Err::<(), _>(anyhow!("provider refresh failed")) },
            &quick(100),
        ));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("provider refresh failed"));
    }
}
