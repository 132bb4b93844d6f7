//! Deferred computations that convert panics and foreign errors into [`Error`]s.
//!
//! `Try<'a, T>` is the one synchronous boundary where failures raised by a
//! computation are captured instead of propagating. [`Outcome`] combinators
//! never catch panics; wrap the computation in a `Try` when that is needed.
//!
//! A `Try` is lazy: nothing runs until it is eliminated with
//! [`fold`](Try::fold), [`if_exception`](Try::if_exception),
//! [`to_outcome`](Try::to_outcome) or [`to_optional`](Try::to_optional).
//!
//! # Examples
//!
//! ```rust
//! use unifunc::attempt::Try;
//! use unifunc::error::PanicError;
//!
//! let parsed = Try::of_fallible(|| "42".parse::<i32>()).map(|value| value + 1);
//! assert_eq!(parsed.if_exception(-1), 43);
//!
//! let exploded = Try::of(|| -> i32 { panic!("boom") }).to_outcome();
//! assert!(exploded.is_error::<PanicError>());
//! ```

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::error::{Error, PanicError};
use crate::optional::Optional;
use crate::outcome::Outcome;

type Thunk<'a, T> = Box<dyn FnOnce() -> Result<T, Error> + 'a>;

/// A deferred computation whose panics and errors become [`Error`] values.
pub struct Try<'a, T> {
    thunk: Thunk<'a, T>,
}

impl<'a, T: 'a> Try<'a, T> {
    /// Defers `function`; a panic raised by it becomes a [`PanicError`].
    pub fn of<F>(function: F) -> Self
    where
        F: FnOnce() -> T + 'a,
    {
        Self {
            thunk: Box::new(move || Ok(function())),
        }
    }

    /// Defers a fallible `function`; its error is classified with
    /// [`Error::classify`].
    pub fn of_fallible<F, E>(function: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + 'a,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            thunk: Box::new(move || function().map_err(|error| Error::classify(Box::new(error)))),
        }
    }

    /// Transforms the eventual value.
    pub fn map<U: 'a, F>(self, function: F) -> Try<'a, U>
    where
        F: FnOnce(T) -> U + 'a,
    {
        let thunk = self.thunk;
        Try {
            thunk: Box::new(move || thunk().map(function)),
        }
    }

    /// Chains another deferred computation.
    pub fn bind<U: 'a, F>(self, function: F) -> Try<'a, U>
    where
        F: FnOnce(T) -> Try<'a, U> + 'a,
    {
        let thunk = self.thunk;
        Try {
            thunk: Box::new(move || thunk().and_then(|value| (function(value).thunk)())),
        }
    }

    /// Runs the computation and eliminates its result.
    pub fn fold<U, F, G>(self, on_value: F, on_exception: G) -> U
    where
        F: FnOnce(T) -> U,
        G: FnOnce(Error) -> U,
    {
        match self.run() {
            Ok(value) => on_value(value),
            Err(error) => on_exception(error),
        }
    }

    /// Runs the computation, returning `fallback` if it failed.
    pub fn if_exception(self, fallback: T) -> T {
        self.fold(|value| value, |_| fallback)
    }

    /// Runs the computation into an [`Outcome`].
    pub fn to_outcome(self) -> Outcome<T> {
        self.run().into()
    }

    /// Runs the computation into an [`Optional`], discarding the error.
    pub fn to_optional(self) -> Optional<T> {
        self.run().ok().into()
    }

    fn run(self) -> Result<T, Error> {
        let thunk = self.thunk;
        catch_unwind(AssertUnwindSafe(thunk)).unwrap_or_else(|payload| {
            let panic = PanicError::from_payload(payload.as_ref());
            tracing::warn!(panic = panic.message(), "panic caught in Try");
            Err(Error::from(panic))
        })
    }
}

impl<T> fmt::Debug for Try<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Try(<deferred>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExceptionError;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn if_exception_returns_value_when_valid() {
        assert_eq!(Try::of(|| 1).if_exception(-1), 1);
    }

    #[rstest]
    fn valid_try_converts_to_ok() {
        assert_eq!(Try::of(|| 1).to_outcome(), Outcome::ok(1));
    }

    #[rstest]
    fn panicking_try_converts_to_panic_failure() {
        let outcome = Try::of(|| -> i32 { panic!("exploded") }).to_outcome();
        assert!(outcome.is_error::<PanicError>());
        assert!(outcome.error().is_some_and(Error::is_exception));
        assert_eq!(
            outcome.error().map(Error::message),
            Some("panicked: exploded".to_string())
        );
    }

    #[rstest]
    fn fallible_try_wraps_foreign_error() {
        let outcome = Try::of_fallible(|| "x".parse::<u8>()).to_outcome();
        assert!(outcome.is_error::<ExceptionError>());
        assert!(outcome.is_exception::<std::num::ParseIntError>());
    }

    #[rstest]
    fn mapping_valid_try() {
        assert_eq!(Try::of(|| 1).map(|value| value + 1).if_exception(-1), 2);
    }

    #[rstest]
    fn panic_inside_map_is_caught() {
        let value = Try::of(|| 1)
            .map(|value: i32| -> i32 { panic!("map failed at {value}") })
            .if_exception(-1);
        assert_eq!(value, -1);
    }

    #[rstest]
    #[case(2, 4)]
    #[case(0, -1)]
    fn bind_chains_fallible_steps(#[case] divisor: i32, #[case] expected: i32) {
        let value = Try::of(|| 8)
            .bind(|dividend| Try::of(move || dividend / divisor))
            .if_exception(-1);
        assert_eq!(value, expected);
    }

    #[rstest]
    fn fold_selects_branch() {
        assert_eq!(Try::of(|| 1).fold(|value| value + 1, |_| -1), 2);
        assert_eq!(Try::of(|| -> i32 { panic!("no") }).fold(|value| value + 1, |_| -1), -1);
    }

    #[rstest]
    fn computation_is_deferred() {
        let calls = Cell::new(0);
        let attempt = Try::of(|| calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 0);
        assert!(attempt.to_optional().is_some());
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn failed_try_converts_to_none() {
        assert!(Try::of(|| -> u8 { panic!("x") }).to_optional().is_none());
    }
}
