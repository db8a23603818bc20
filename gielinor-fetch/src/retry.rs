//! Retry strategies for provider requests.

use gielinor_core::ApiError;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Strategy for retrying failed requests.
///
/// Eligibility is decided by [`ApiError::is_retryable`] on the already
/// classified error, so the strategy only owns the budget and the delays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryStrategy {
    /// Maximum number of attempts, the first one included.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Whether to double the delay after every retry.
    pub exponential_backoff: bool,
    /// Maximum delay between retries.
    pub max_delay: Duration,
}

impl RetryStrategy {
    /// Creates a new retry strategy with the default delays.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_millis(400),
            exponential_backoff: true,
            max_delay: Duration::from_millis(2000),
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            exponential_backoff: false,
            max_delay: Duration::ZERO,
        }
    }

    /// Sets the base delay.
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the maximum delay.
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Enables or disables exponential backoff.
    #[must_use]
    pub fn with_exponential_backoff(mut self, enabled: bool) -> Self {
        self.exponential_backoff = enabled;
        self
    }

    /// Calculates the delay after the given failed attempt (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = if self.exponential_backoff {
            let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
            self.base_delay.saturating_mul(factor)
        } else {
            self.base_delay
        };

        delay.min(self.max_delay)
    }

    /// Determines if a classified error should be retried.
    pub fn should_retry(&self, error: &ApiError) -> bool {
        error.is_retryable()
    }

    /// Runs `op` until it succeeds, fails terminally, or the budget is spent.
    ///
    /// `op` receives the 1-based attempt number. Attempts run sequentially;
    /// the last error is returned unchanged.
    pub async fn run<T, F, Fut>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.run_until_cancelled(None, op).await
    }

    /// Like [`run`](Self::run), but a cancelled `token` cuts the backoff
    /// sleep short and the call fails as [`ApiError::Cancelled`].
    pub async fn run_until_cancelled<T, F, Fut>(
        &self,
        token: Option<&CancellationToken>,
        mut op: F,
    ) -> Result<T, ApiError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if attempt >= self.max_attempts || !self.should_retry(&error) {
                        debug!(
                            attempt,
                            kind = %error.kind(),
                            "Giving up"
                        );
                        return Err(error);
                    }

                    let delay = self.delay_for_attempt(attempt);
                    warn!(
                        provider = %error.provider(),
                        error = %error,
                        attempt,
                        delay_ms = delay.as_millis(),
                        "Request failed, retrying"
                    );
                    let Some(token) = token else {
                        tokio::time::sleep(delay).await;
                        continue;
                    };
                    tokio::select! {
                        () = tokio::time::sleep(delay) => {}
                        () = token.cancelled() => {
                            debug!(attempt, "Cancelled during backoff");
                            return Err(ApiError::Cancelled {
                                provider: error.provider(),
                            });
                        }
                    }
                }
            }
        }
    }
}

impl Default for RetryStrategy {
    /// Three attempts, 400ms doubling up to 2s.
    fn default() -> Self {
        Self::new(3)
    }
}
