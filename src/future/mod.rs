//! Memoized asynchronous outcomes.
//!
//! [`AsyncOutcome<T>`] wraps a deferred computation that resolves to an
//! [`Outcome<T>`]. The computation is polled only once it is observed, and it
//! is evaluated at most once no matter how many clones of the handle observe
//! it: later observers replay the cached outcome.
//!
//! `map`, `bind` and `map_error` compose lazily. Each link of the chain is
//! guarded: a panic raised by the wrapped future or by a user closure is caught
//! and resolved as a [`PanicError`] failure.
//!
//! [`AsyncOptional<T>`] is the error-free counterpart: the same evaluation
//! model, resolving to an [`Optional<T>`].
//!
//! A default-constructed `AsyncOutcome` is uninitialized. Composing it yields
//! uninitialized handles, and observing it returns
//! [`InvalidOperationError::UninitializedAsyncOutcome`].
//!
//! # Examples
//!
//! ```rust
//! use futures::executor::block_on;
//! use unifunc::future::AsyncOutcome;
//! use unifunc::outcome::Outcome;
//!
//! let price = AsyncOutcome::from_future(async { 40 })
//!     .map(|value| value + 2)
//!     .bind(|value| AsyncOutcome::ok(value * 10));
//!
//! assert_eq!(block_on(price.resolve()), Ok(Outcome::ok(420)));
//! ```

mod optional;
mod retry;

pub use optional::AsyncOptional;
pub use retry::{RetryPolicy, retry};

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::future::{AbortRegistration, Abortable, BoxFuture, Shared};
use futures::stream::{self, Stream};
use futures::{FutureExt, StreamExt};

use crate::error::{
    CancellationError, Error, InvalidOperationError, NoneOptionError, PanicError, Uninitialized,
};
use crate::optional::Optional;
use crate::outcome::Outcome;

type SharedOutcome<T> = Shared<BoxFuture<'static, Outcome<T>>>;

/// A single-resolution, memoized asynchronous [`Outcome`].
///
/// Cloning the handle shares the underlying computation.
pub struct AsyncOutcome<T> {
    shared: Option<SharedOutcome<T>>,
}

impl<T> AsyncOutcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    // =========================================================================
    // Construction
    // =========================================================================

    /// Wraps a future resolving to an `Outcome`.
    pub fn from_outcome_future<F>(future: F) -> Self
    where
        F: Future<Output = Outcome<T>> + Send + 'static,
    {
        let guarded = AssertUnwindSafe(future).catch_unwind().map(|caught| {
            caught.unwrap_or_else(|payload| {
                let panic = PanicError::from_payload(payload.as_ref());
                tracing::warn!(panic = panic.message(), "panic caught in async outcome");
                Outcome::Fail(Error::from(panic))
            })
        });
        Self {
            shared: Some(guarded.boxed().shared()),
        }
    }

    /// Wraps an infallible future; only a panic can fail it.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::from_outcome_future(future.map(Outcome::Ok))
    }

    /// Wraps a fallible future, classifying its error with [`Error::classify`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futures::executor::block_on;
    /// use unifunc::future::AsyncOutcome;
    ///
    /// let parsed = AsyncOutcome::from_fallible(async { "7x".parse::<i32>() });
    /// let outcome = block_on(parsed.resolve()).unwrap();
    /// assert!(outcome.is_exception::<std::num::ParseIntError>());
    /// ```
    pub fn from_fallible<F, E>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::from_outcome_future(future.map(Outcome::from_result))
    }

    /// An already resolved instance.
    pub fn from_outcome(outcome: Outcome<T>) -> Self {
        Self::from_outcome_future(futures::future::ready(outcome))
    }

    /// An already resolved instance; an absent value fails with [`NoneOptionError`].
    pub fn from_optional(optional: Optional<T>) -> Self {
        Self::from_outcome(optional.to_outcome(NoneOptionError))
    }

    /// An already resolved success.
    pub fn ok(value: T) -> Self {
        Self::from_outcome(Outcome::Ok(value))
    }

    /// An already resolved failure.
    pub fn fail(error: impl Into<Error>) -> Self {
        Self::from_outcome(Outcome::Fail(error.into()))
    }

    /// An already resolved failure wrapping a foreign error as an exception.
    pub fn fail_exception<E>(exception: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::from_outcome(Outcome::fail_exception(exception))
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Transforms the eventual success value.
    #[must_use]
    pub fn map<U, F>(self, function: F) -> AsyncOutcome<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        match self.shared {
            Some(shared) => {
                AsyncOutcome::from_outcome_future(async move { shared.await.map(function) })
            }
            None => AsyncOutcome::default(),
        }
    }

    /// Chains another asynchronous outcome once this one succeeds.
    ///
    /// A continuation that returns an uninitialized handle resolves to
    /// `Fail(Uninitialized)`.
    #[must_use]
    pub fn bind<U, F>(self, function: F) -> AsyncOutcome<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> AsyncOutcome<U> + Send + 'static,
    {
        match self.shared {
            Some(shared) => AsyncOutcome::from_outcome_future(async move {
                match shared.await {
                    Outcome::Ok(value) => function(value).settle().await,
                    Outcome::Fail(error) => Outcome::Fail(error),
                }
            }),
            None => AsyncOutcome::default(),
        }
    }

    /// Transforms the eventual error.
    #[must_use]
    pub fn map_error<F>(self, function: F) -> Self
    where
        F: FnOnce(Error) -> Error + Send + 'static,
    {
        match self.shared {
            Some(shared) => {
                Self::from_outcome_future(async move { shared.await.map_error(function) })
            }
            None => Self::default(),
        }
    }

    /// Falls back to the outcome produced by `fallback` when this one fails.
    ///
    /// The fallback is invoked lazily with the failure, and at most once. A
    /// fallback returning an uninitialized handle resolves to
    /// `Fail(Uninitialized)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futures::executor::block_on;
    /// use unifunc::error::Error;
    /// use unifunc::future::AsyncOutcome;
    /// use unifunc::outcome::Outcome;
    ///
    /// let cached = AsyncOutcome::<u32>::fail(Error::new("cache miss"))
    ///     .or_else(|_| AsyncOutcome::ok(17));
    /// assert_eq!(block_on(cached.resolve()), Ok(Outcome::ok(17)));
    /// ```
    #[must_use]
    pub fn or_else<F>(self, fallback: F) -> Self
    where
        F: FnOnce(Error) -> Self + Send + 'static,
    {
        match self.shared {
            Some(shared) => Self::from_outcome_future(async move {
                match shared.await {
                    Outcome::Ok(value) => Outcome::Ok(value),
                    Outcome::Fail(error) => fallback(error).settle().await,
                }
            }),
            None => Self::default(),
        }
    }

    /// Resolves to `Fail(CancellationError)` if `registration` is aborted
    /// before the computation completes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futures::executor::block_on;
    /// use futures::future::{AbortHandle, pending};
    /// use unifunc::error::CancellationError;
    /// use unifunc::future::AsyncOutcome;
    ///
    /// let (handle, registration) = AbortHandle::new_pair();
    /// let request = AsyncOutcome::<u8>::from_future(pending()).cancellable(registration);
    ///
    /// handle.abort();
    /// let outcome = block_on(request.resolve()).unwrap();
    /// assert!(outcome.is_error::<CancellationError>());
    /// ```
    #[must_use]
    pub fn cancellable(self, registration: AbortRegistration) -> Self {
        match self.shared {
            Some(shared) => Self::from_outcome_future(async move {
                Abortable::new(shared, registration)
                    .await
                    .unwrap_or_else(|_aborted| {
                        tracing::debug!("async outcome cancelled");
                        Outcome::Fail(Error::from(CancellationError))
                    })
            }),
            None => Self::default(),
        }
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Awaits the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperationError::UninitializedAsyncOutcome`] for a
    /// default-constructed handle.
    pub async fn resolve(&self) -> Result<Outcome<T>, InvalidOperationError> {
        Ok(self.initialized()?.await)
    }

    /// Awaits the outcome and eliminates it; exactly one branch runs.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperationError::UninitializedAsyncOutcome`] for a
    /// default-constructed handle; neither branch runs in that case.
    pub async fn fold<U, F, G>(&self, on_ok: F, on_error: G) -> Result<U, InvalidOperationError>
    where
        F: FnOnce(T) -> U,
        G: FnOnce(Error) -> U,
    {
        Ok(self.resolve().await?.fold(on_ok, on_error))
    }

    /// Awaits the outcome and runs `action` on success.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperationError::UninitializedAsyncOutcome`] for a
    /// default-constructed handle.
    pub async fn for_ok<F>(&self, action: F) -> Result<(), InvalidOperationError>
    where
        F: FnOnce(T),
    {
        self.resolve().await.map(|outcome| outcome.for_ok(action))
    }

    /// Awaits the outcome and runs exactly one of the two actions.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperationError::UninitializedAsyncOutcome`] for a
    /// default-constructed handle.
    pub async fn bi_for_each<F, G>(
        &self,
        on_ok: F,
        on_error: G,
    ) -> Result<(), InvalidOperationError>
    where
        F: FnOnce(T),
        G: FnOnce(Error),
    {
        self.resolve()
            .await
            .map(|outcome| outcome.bi_for_each(on_ok, on_error))
    }

    /// Awaits the success value, or `fallback` on failure.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperationError::UninitializedAsyncOutcome`] for a
    /// default-constructed handle.
    pub async fn if_error(&self, fallback: T) -> Result<T, InvalidOperationError> {
        self.resolve().await.map(|outcome| outcome.if_error(fallback))
    }

    /// Awaits the success value, recovering from a failure with `recover`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperationError::UninitializedAsyncOutcome`] for a
    /// default-constructed handle.
    pub async fn if_error_with<F>(&self, recover: F) -> Result<T, InvalidOperationError>
    where
        F: FnOnce(Error) -> T,
    {
        self.resolve()
            .await
            .map(|outcome| outcome.if_error_with(recover))
    }

    /// A stream of at most one item.
    ///
    /// The success value is yielded once. A failure, or an uninitialized
    /// handle, ends the stream without yielding: the error is dropped here,
    /// unlike in [`fold`](Self::fold).
    pub fn into_stream(self) -> impl Stream<Item = T> + Send {
        let shared = self.shared;
        stream::once(async move {
            match shared {
                Some(shared) => shared.await.to_optional(),
                None => Optional::None,
            }
        })
        .flat_map(stream::iter)
    }

    /// Views the outcome as an [`AsyncOptional`]; a failure, or an
    /// uninitialized handle, reads as `None`.
    pub fn to_async_optional(self) -> AsyncOptional<T> {
        match self.shared {
            Some(shared) => AsyncOptional::from_future(async move { shared.await.to_optional() }),
            None => AsyncOptional::none(),
        }
    }

    /// Returns `true` unless this handle was default-constructed.
    pub const fn is_initialized(&self) -> bool {
        self.shared.is_some()
    }

    /// The outcome, if the computation already completed.
    pub fn peek(&self) -> Option<&Outcome<T>> {
        self.shared.as_ref().and_then(Shared::peek)
    }

    fn initialized(&self) -> Result<SharedOutcome<T>, InvalidOperationError> {
        self.shared
            .clone()
            .ok_or(InvalidOperationError::UninitializedAsyncOutcome)
    }

    async fn settle(self) -> Outcome<T> {
        match self.shared {
            Some(shared) => shared.await,
            None => Outcome::Fail(Error::from(Uninitialized)),
        }
    }
}

impl<T> AsyncOutcome<AsyncOutcome<T>>
where
    T: Clone + Send + Sync + 'static,
{
    /// Removes one level of nesting.
    #[must_use]
    pub fn unwrap_nested(self) -> AsyncOutcome<T> {
        self.bind(|inner| inner)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T> Default for AsyncOutcome<T> {
    fn default() -> Self {
        Self { shared: None }
    }
}

impl<T> Clone for AsyncOutcome<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> From<Outcome<T>> for AsyncOutcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(outcome: Outcome<T>) -> Self {
        Self::from_outcome(outcome)
    }
}

impl<T> fmt::Debug for AsyncOutcome<T>
where
    T: Clone + Send + Sync + fmt::Debug + 'static,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.shared, self.peek()) {
            (None, _) => formatter.write_str("AsyncOutcome(<uninitialized>)"),
            (Some(_), None) => formatter.write_str("AsyncOutcome(<pending>)"),
            (Some(_), Some(outcome)) => {
                formatter.debug_tuple("AsyncOutcome").field(outcome).finish()
            }
        }
    }
}

static_assertions::assert_impl_all!(AsyncOutcome<String>: Send, Sync, Clone);
