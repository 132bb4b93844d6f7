//! Memoized asynchronous optional values.

use std::fmt;
use std::future::Future;

use futures::FutureExt;

use super::AsyncOutcome;
use crate::error::{Error, NoneOptionError};
use crate::optional::Optional;
use crate::outcome::Outcome;

/// A single-resolution, memoized asynchronous [`Optional`].
///
/// Evaluation follows [`AsyncOutcome`]: lazy, at most once, shared between
/// clones. Absence carries no error, and a panic in the computation reads as
/// `None`. A default-constructed `AsyncOptional` is `None`.
///
/// # Examples
///
/// ```rust
/// use futures::executor::block_on;
/// use unifunc::future::AsyncOptional;
/// use unifunc::optional::Optional;
///
/// let take_one = |count: u32| match count.checked_sub(1) {
///     Some(left) => AsyncOptional::some(left),
///     None => AsyncOptional::none(),
/// };
/// let stock = AsyncOptional::some(3).bind(take_one).map(|left| format!("{left} left"));
///
/// assert_eq!(block_on(stock.resolve()), Optional::some("2 left".to_string()));
/// assert!(block_on(AsyncOptional::<u8>::default().is_none()));
/// ```
pub struct AsyncOptional<T> {
    outcome: AsyncOutcome<T>,
}

impl<T> AsyncOptional<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wraps a future resolving to an `Optional`.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Optional<T>> + Send + 'static,
    {
        Self {
            outcome: AsyncOutcome::from_outcome_future(
                future.map(|optional| optional.to_outcome(NoneOptionError)),
            ),
        }
    }

    /// An already resolved instance.
    pub fn from_optional(optional: Optional<T>) -> Self {
        Self {
            outcome: AsyncOutcome::from_optional(optional),
        }
    }

    /// An already resolved present value.
    pub fn some(value: T) -> Self {
        Self::from_optional(Optional::Some(value))
    }

    /// An already resolved absent value.
    pub fn none() -> Self {
        Self::from_optional(Optional::None)
    }

    /// Transforms the eventual value.
    #[must_use]
    pub fn map<U, F>(self, function: F) -> AsyncOptional<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        AsyncOptional {
            outcome: self.outcome.map(function),
        }
    }

    /// Chains another asynchronous optional; `function` does not run on `None`.
    #[must_use]
    pub fn bind<U, F>(self, function: F) -> AsyncOptional<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> AsyncOptional<U> + Send + 'static,
    {
        AsyncOptional {
            outcome: self.outcome.bind(move |value| function(value).outcome),
        }
    }

    /// Falls back to `fallback` when this resolves to `None`.
    #[must_use]
    pub fn or_else<F>(self, fallback: F) -> Self
    where
        F: FnOnce() -> Self + Send + 'static,
    {
        Self {
            outcome: self.outcome.or_else(move |_| fallback().outcome),
        }
    }

    /// Awaits the value.
    pub async fn resolve(&self) -> Optional<T> {
        self.outcome
            .resolve()
            .await
            .map_or(Optional::None, Outcome::to_optional)
    }

    /// Awaits the value and reports whether it is present.
    pub async fn is_some(&self) -> bool {
        self.resolve().await.is_some()
    }

    /// Awaits the value and reports whether it is absent.
    pub async fn is_none(&self) -> bool {
        self.resolve().await.is_none()
    }

    /// Promotes to an [`AsyncOutcome`], failing with `error` when absent.
    pub fn to_async_outcome(self, error: impl Into<Error>) -> AsyncOutcome<T> {
        let error = error.into();
        self.outcome.map_error(move |_| error)
    }
}

impl<T> Default for AsyncOptional<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::none()
    }
}

impl<T> Clone for AsyncOptional<T> {
    fn clone(&self) -> Self {
        Self {
            outcome: self.outcome.clone(),
        }
    }
}

impl<T> From<Optional<T>> for AsyncOptional<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(optional: Optional<T>) -> Self {
        Self::from_optional(optional)
    }
}

impl<T> fmt::Debug for AsyncOptional<T>
where
    T: Clone + Send + Sync + fmt::Debug + 'static,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome.peek() {
            None => formatter.write_str("AsyncOptional(<pending>)"),
            Some(outcome) => formatter
                .debug_tuple("AsyncOptional")
                .field(&outcome.as_ref().to_optional())
                .finish(),
        }
    }
}

static_assertions::assert_impl_all!(AsyncOptional<String>: Send, Sync, Clone);
