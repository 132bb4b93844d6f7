//! Outcome type - success with a value, or failure with an [`Error`].
//!
//! `Outcome<T>` is the fallible counterpart of [`Optional`]: the failure
//! channel always carries a typed [`Error`], and the error travels unchanged
//! through [`map`](Outcome::map) and [`bind`](Outcome::bind) until it is
//! transformed ([`bi_map`](Outcome::bi_map), [`map_error`](Outcome::map_error))
//! or consumed ([`fold`](Outcome::fold), [`fold_error`](Outcome::fold_error)).
//!
//! Combinators never catch panics raised by the closures they are given. Use
//! [`Try`](crate::attempt::Try) to turn a panicking computation into an
//! `Outcome`.
//!
//! # Examples
//!
//! ```rust
//! use unifunc::error::Error;
//! use unifunc::outcome::Outcome;
//!
//! fn parse(input: &str) -> Outcome<i32> {
//!     Outcome::from_result(input.parse::<i32>())
//! }
//!
//! let doubled = parse("21").map(|value| value * 2);
//! assert_eq!(doubled, Outcome::ok(42));
//!
//! let failed = Outcome::<i32>::fail(Error::new("x")).map(|value| value + 1);
//! assert_eq!(failed, Outcome::fail(Error::new("x")));
//! ```

mod matcher;

pub use matcher::{AutoMatcher, OutcomeMatcher};

use std::any::{Any, type_name};
use std::fmt;

use crate::error::{
    Error, Failure, InvalidCast, InvalidOperationError, PredicateFailed, ResultCastError,
    Uninitialized,
};
use crate::optional::Optional;

/// Either a success value of type `T` or a failure [`Error`].
///
/// The default value is `Fail` carrying an [`Uninitialized`] error.
///
/// # Examples
///
/// ```rust
/// use unifunc::error::Uninitialized;
/// use unifunc::outcome::Outcome;
///
/// let unset: Outcome<i32> = Outcome::default();
/// assert!(unset.is_fail());
/// assert!(unset.is_error::<Uninitialized>());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// A successful computation.
    Ok(T),
    /// A failed computation.
    Fail(Error),
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self::Fail(Error::from(Uninitialized))
    }
}

impl<T> Outcome<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a success.
    #[inline]
    pub const fn ok(value: T) -> Self {
        Self::Ok(value)
    }

    /// Creates a failure from anything convertible into an [`Error`].
    #[inline]
    pub fn fail(error: impl Into<Error>) -> Self {
        Self::Fail(error.into())
    }

    /// Creates a failure wrapping a foreign error as an exception.
    #[inline]
    pub fn fail_exception<E>(exception: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Fail(Error::exception(exception))
    }

    /// Lifts a `std::result::Result`, classifying its error.
    ///
    /// An [`Error`] or [`ResultCastError`] is carried verbatim; any other error
    /// becomes an exception failure.
    pub fn from_result<E>(result: Result<T, E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Fail(Error::classify(Box::new(error))),
        }
    }

    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` on success.
    #[inline]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns `true` on failure.
    #[inline]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// Returns `true` if this is a failure carrying an `F`.
    pub fn is_error<F: Failure>(&self) -> bool {
        matches!(self, Self::Fail(error) if error.is::<F>())
    }

    /// Returns `true` if this is a failure wrapping a foreign error of type `E`.
    pub fn is_exception<E>(&self) -> bool
    where
        E: std::error::Error + 'static,
    {
        self.error()
            .and_then(Error::exception_ref)
            .is_some_and(|exception| exception.is::<E>())
    }

    // =========================================================================
    // Reference Extraction
    // =========================================================================

    /// Borrows the success value.
    #[inline]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Fail(_) => None,
        }
    }

    /// Borrows the failure.
    #[inline]
    pub const fn error(&self) -> Option<&Error> {
        match self {
            Self::Ok(_) => None,
            Self::Fail(error) => Some(error),
        }
    }

    /// Converts `&Outcome<T>` into `Outcome<&T>`.
    #[inline]
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Fail(error) => Outcome::Fail(error.clone()),
        }
    }

    // =========================================================================
    // Mapping Operations
    // =========================================================================

    /// Applies `function` to a success value; a failure is passed through untouched.
    #[inline]
    pub fn map<U, F>(self, function: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(function(value)),
            Self::Fail(error) => Outcome::Fail(error),
        }
    }

    /// Transforms the error; a success is passed through untouched.
    #[inline]
    #[must_use]
    pub fn map_error<F>(self, function: F) -> Self
    where
        F: FnOnce(Error) -> Error,
    {
        match self {
            Self::Ok(value) => Self::Ok(value),
            Self::Fail(error) => Self::Fail(function(error)),
        }
    }

    /// Transforms whichever channel is active.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unifunc::error::Error;
    /// use unifunc::outcome::Outcome;
    ///
    /// let failed = Outcome::<i32>::fail(Error::new("timeout"))
    ///     .bi_map(|value| value + 1, |error| Error::new(format!("fetch: {error}")));
    /// assert_eq!(failed, Outcome::fail(Error::new("fetch: timeout")));
    /// ```
    #[inline]
    pub fn bi_map<U, F, G>(self, on_ok: F, on_error: G) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
        G: FnOnce(Error) -> Error,
    {
        match self {
            Self::Ok(value) => Outcome::Ok(on_ok(value)),
            Self::Fail(error) => Outcome::Fail(on_error(error)),
        }
    }

    /// Chains a fallible computation; short-circuits on failure.
    #[inline]
    pub fn bind<U, F>(self, function: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Self::Ok(value) => function(value),
            Self::Fail(error) => Outcome::Fail(error),
        }
    }

    /// Keeps a success only if `predicate` accepts it.
    ///
    /// A rejected success, and any failure, become `Fail(PredicateFailed)`.
    #[inline]
    #[must_use]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Ok(value) if predicate(&value) => Self::Ok(value),
            _ => Self::Fail(Error::from(PredicateFailed)),
        }
    }

    /// Keeps a success only if its runtime type is `U`.
    ///
    /// Anything else, including a failure, becomes `Fail(InvalidCast)`.
    pub fn try_cast<U: 'static>(self) -> Outcome<U>
    where
        T: 'static,
    {
        match self {
            Self::Ok(value) => {
                let boxed: Box<dyn Any> = Box::new(value);
                boxed.downcast::<U>().map_or_else(
                    |_| Outcome::Fail(Error::from(InvalidCast)),
                    |cast| Outcome::Ok(*cast),
                )
            }
            Self::Fail(_) => Outcome::Fail(Error::from(InvalidCast)),
        }
    }

    // =========================================================================
    // Elimination
    // =========================================================================

    /// Eliminates the `Outcome`; exactly one branch runs.
    #[inline]
    pub fn fold<U, F, G>(self, on_ok: F, on_error: G) -> U
    where
        F: FnOnce(T) -> U,
        G: FnOnce(Error) -> U,
    {
        match self {
            Self::Ok(value) => on_ok(value),
            Self::Fail(error) => on_error(error),
        }
    }

    /// Eliminates the `Outcome` when the failure is known to be an `E`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperationError::NoErrorMatch`] when this is a failure
    /// whose runtime type is not `E`; neither branch runs in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unifunc::error::{Error, InvalidCast, InvalidOperationError, MessageError};
    /// use unifunc::outcome::Outcome;
    ///
    /// let failed = Outcome::<i32>::fail(InvalidCast);
    /// let handled = failed.clone().fold_error::<InvalidCast, _>(|_| 0, |_| -1);
    /// assert_eq!(handled, Ok(-1));
    ///
    /// let mismatch = failed.fold_error::<MessageError, _>(|_| 0, |_| -1);
    /// assert!(matches!(mismatch, Err(InvalidOperationError::NoErrorMatch { .. })));
    /// ```
    pub fn fold_error<E, U>(
        self,
        on_ok: impl FnOnce(T) -> U,
        on_error: impl FnOnce(&E) -> U,
    ) -> Result<U, InvalidOperationError>
    where
        E: Failure,
    {
        match self {
            Self::Ok(value) => Ok(on_ok(value)),
            Self::Fail(error) => error.downcast_ref::<E>().map(on_error).ok_or(
                InvalidOperationError::NoErrorMatch {
                    expected: type_name::<E>(),
                },
            ),
        }
    }

    /// Eliminates the `Outcome` when the failure wraps a foreign error `E`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperationError::NoErrorMatch`] when this is a failure
    /// that does not wrap an `E`.
    pub fn fold_exception<E, U>(
        self,
        on_ok: impl FnOnce(T) -> U,
        on_exception: impl FnOnce(&E) -> U,
    ) -> Result<U, InvalidOperationError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Ok(value) => Ok(on_ok(value)),
            Self::Fail(error) => error
                .exception_ref()
                .and_then(|exception| exception.downcast_ref::<E>())
                .map(on_exception)
                .ok_or(InvalidOperationError::NoErrorMatch {
                    expected: type_name::<E>(),
                }),
        }
    }

    /// Returns the success value or `fallback`.
    #[inline]
    pub fn if_error(self, fallback: T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Fail(_) => fallback,
        }
    }

    /// Returns the success value or recovers from the error.
    #[inline]
    pub fn if_error_with<F>(self, recover: F) -> T
    where
        F: FnOnce(Error) -> T,
    {
        match self {
            Self::Ok(value) => value,
            Self::Fail(error) => recover(error),
        }
    }

    /// Returns the success value or `T::default()`.
    #[inline]
    pub fn if_fail_default(self) -> T
    where
        T: Default,
    {
        self.if_error_with(|_| T::default())
    }

    /// Forced unwrap.
    ///
    /// # Errors
    ///
    /// Returns a [`ResultCastError`] carrying the original error on failure.
    #[inline]
    pub fn into_value(self) -> Result<T, ResultCastError> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Fail(error) => Err(ResultCastError::new(error)),
        }
    }

    /// Converts into a `std::result::Result`.
    #[inline]
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Fail(error) => Err(error),
        }
    }

    /// Projects to an [`Optional`], discarding the error.
    #[inline]
    pub fn to_optional(self) -> Optional<T> {
        match self {
            Self::Ok(value) => Optional::Some(value),
            Self::Fail(_) => Optional::None,
        }
    }

    // =========================================================================
    // Side Effects
    // =========================================================================

    /// Runs `action` on a success value.
    #[inline]
    pub fn for_ok<F>(self, action: F)
    where
        F: FnOnce(T),
    {
        if let Self::Ok(value) = self {
            action(value);
        }
    }

    /// Runs exactly one of the two actions.
    #[inline]
    pub fn bi_for_each<F, G>(self, on_ok: F, on_error: G)
    where
        F: FnOnce(T),
        G: FnOnce(Error),
    {
        match self {
            Self::Ok(value) => on_ok(value),
            Self::Fail(error) => on_error(error),
        }
    }

    /// Builds a matcher bound to this outcome.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unifunc::outcome::Outcome;
    ///
    /// let mut seen = 0;
    /// Outcome::ok(5)
    ///     .matcher(|matcher| matcher.on_ok(|value| seen = *value))
    ///     .run();
    /// assert_eq!(seen, 5);
    /// ```
    pub fn matcher<'h, S>(&self, setup: S) -> AutoMatcher<'_, 'h, T>
    where
        S: FnOnce(OutcomeMatcher<'h, T>) -> OutcomeMatcher<'h, T>,
    {
        AutoMatcher::new(self, setup(OutcomeMatcher::new()))
    }
}

impl<T> Outcome<Outcome<T>> {
    /// Removes one level of nesting.
    #[inline]
    pub fn flatten(self) -> Outcome<T> {
        self.bind(|inner| inner)
    }
}

impl Outcome<()> {
    /// Returns `alternative` when `condition` holds, otherwise `Ok(())`.
    #[inline]
    #[must_use]
    pub fn when(condition: bool, alternative: Self) -> Self {
        if condition { alternative } else { Self::Ok(()) }
    }

    /// Returns `alternative` unless `condition` holds.
    #[inline]
    #[must_use]
    pub fn unless(condition: bool, alternative: Self) -> Self {
        Self::when(!condition, alternative)
    }
}

// =============================================================================
// Conversions and Formatting
// =============================================================================

impl<T> From<Result<T, Error>> for Outcome<T> {
    #[inline]
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Fail(error),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Error> {
    #[inline]
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

impl<T: fmt::Display> fmt::Display for Outcome<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(value) => write!(formatter, "Ok({value})"),
            Self::Fail(error) => write!(formatter, "Fail({error})"),
        }
    }
}

impl<T> IntoIterator for Outcome<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_result().ok().into_iter()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

/// Serialized as `{"Ok": value}` or `{"Fail": message}`.
///
/// Deserializing a failure yields a message error; the concrete failure type
/// does not survive the round trip.
#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Outcome<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Ok(value) => serializer.serialize_newtype_variant("Outcome", 0, "Ok", value),
            Self::Fail(error) => {
                serializer.serialize_newtype_variant("Outcome", 1, "Fail", &error.message())
            }
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Outcome<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(rename = "Outcome")]
        enum Wire<T> {
            Ok(T),
            Fail(String),
        }

        Wire::<T>::deserialize(deserializer).map(|wire| match wire {
            Wire::Ok(value) => Self::Ok(value),
            Wire::Fail(message) => Self::Fail(Error::new(message)),
        })
    }
}
