//! Retrying failed asynchronous outcomes with exponential backoff.

use std::time::Duration;

use super::AsyncOutcome;
use crate::outcome::Outcome;

/// Controls how [`retry`] re-invokes its factory.
///
/// The delay before the first retry is `initial_delay`; each further delay is
/// the previous one scaled by `multiplier`.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use unifunc::future::RetryPolicy;
///
/// let policy = RetryPolicy::new(3, Duration::from_millis(100));
/// let delays: Vec<Duration> = policy.delays().collect();
/// assert_eq!(
///     delays,
///     vec![Duration::from_millis(100), Duration::from_millis(150), Duration::from_millis(225)]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    retries: usize,
    initial_delay: Duration,
    multiplier: f64,
}

impl RetryPolicy {
    /// Backoff multiplier applied between consecutive retries.
    pub const DEFAULT_MULTIPLIER: f64 = 1.5;

    /// Creates a policy with the default multiplier.
    pub const fn new(retries: usize, initial_delay: Duration) -> Self {
        Self {
            retries,
            initial_delay,
            multiplier: Self::DEFAULT_MULTIPLIER,
        }
    }

    /// Sets the number of retries after the first attempt.
    #[must_use]
    pub const fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the delay before the first retry.
    #[must_use]
    pub const fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Sets the backoff multiplier.
    #[must_use]
    pub const fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Number of retries after the first attempt.
    pub const fn retries(&self) -> usize {
        self.retries
    }

    /// Delay before the first retry.
    pub const fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Backoff multiplier.
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// The delay before each retry, in order.
    ///
    /// A delay too large to represent saturates at `Duration::MAX`; a negative
    /// or NaN multiplier yields `Duration::ZERO`.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let multiplier = self.multiplier;
        std::iter::successors(Some(self.initial_delay), move |delay| {
            let seconds = delay.as_secs_f64() * multiplier;
            Some(Duration::try_from_secs_f64(seconds).unwrap_or(if seconds > 0.0 {
                Duration::MAX
            } else {
                Duration::ZERO
            }))
        })
        .take(self.retries)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(100))
    }
}

/// Runs `factory` until it produces a success, retrying at most
/// `policy.retries()` times.
///
/// The factory is invoked `policy.retries() + 1` times when every attempt
/// fails, and the last failure is returned. A factory returning an
/// uninitialized handle counts as a failed attempt. Nothing runs until the
/// returned outcome is observed.
///
/// Delays use `tokio::time::sleep`, so the returned outcome must be observed
/// inside a Tokio runtime with the time driver enabled.
///
/// # Examples
///
/// ```rust,ignore
/// use std::time::Duration;
/// use unifunc::future::{AsyncOutcome, RetryPolicy, retry};
///
/// let fetched = retry(
///     || AsyncOutcome::from_fallible(fetch_profile()),
///     RetryPolicy::new(3, Duration::from_millis(250)),
/// );
/// let profile = fetched.resolve().await?;
/// ```
pub fn retry<T, F>(factory: F, policy: RetryPolicy) -> AsyncOutcome<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> AsyncOutcome<T> + Send + 'static,
{
    AsyncOutcome::from_outcome_future(async move {
        let mut delays = policy.delays();
        let mut attempt: usize = 1;
        loop {
            let error = match factory().settle().await {
                Outcome::Ok(value) => return Outcome::Ok(value),
                Outcome::Fail(error) => error,
            };
            let Some(delay) = delays.next() else {
                tracing::warn!(attempts = attempt, error = %error, "retries exhausted");
                return Outcome::Fail(error);
            };
            tracing::debug!(
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %error,
                "attempt failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    })
}
