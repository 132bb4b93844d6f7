//! The polymorphic error model carried by [`Outcome`](crate::outcome::Outcome)
//! and [`AsyncOutcome`](crate::future::AsyncOutcome).
//!
//! Every failure is a value implementing [`Failure`]. The [`Error`] handle
//! stores a failure behind an `Arc`, so errors are immutable and cheap to clone
//! across the outcome combinators.
//!
//! The built-in failures cover the whole taxonomy:
//!
//! - [`MessageError`]: a plain message
//! - [`ExceptionError`]: a wrapped `std::error::Error` (the "exception" class)
//! - [`CompoundError`]: an ordered list of errors
//! - [`EnumError`]: an enum value used as an error tag
//! - [`InvalidCast`], [`PredicateFailed`], [`Uninitialized`],
//!   [`NoneOptionError`], [`CancellationError`], [`PanicError`]
//!
//! Domain code adds its own failures by implementing [`Failure`] and can match
//! on them by runtime type with [`Error::is`] and [`Error::downcast_ref`].
//!
//! # Examples
//!
//! ```rust
//! use unifunc::error::{Error, Failure};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("account {0} is frozen")]
//! struct AccountFrozen(u32);
//!
//! impl Failure for AccountFrozen {}
//!
//! let error = Error::from(AccountFrozen(7));
//! assert!(error.is::<AccountFrozen>());
//! assert_eq!(error.message(), "account 7 is frozen");
//! assert_eq!(error.downcast_ref::<AccountFrozen>().map(|frozen| frozen.0), Some(7));
//! ```

mod failures;
mod usage;

pub use failures::{
    CancellationError, CompoundError, EnumError, ExceptionError, InvalidCast, MessageError,
    NoneOptionError, PanicError, PredicateFailed, Uninitialized,
};
pub use usage::{InvalidArgumentError, InvalidOperationError, OptionCastError, ResultCastError};

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A failure descriptor that can be carried by an [`Error`].
///
/// Implementors are ordinary error types; the `Any` supertrait enables
/// matching on the concrete type after the failure has been erased.
pub trait Failure: std::error::Error + Any + Send + Sync {
    /// Returns `true` when this failure wraps a foreign error or a panic.
    fn is_exception(&self) -> bool {
        false
    }

    /// Compares with another failure of the same runtime type.
    ///
    /// The default compares messages. Failures whose message does not
    /// identify their content override it.
    fn eq_failure(&self, other: &dyn Failure) -> bool {
        self.to_string() == other.to_string()
    }
}

/// A shared, immutable handle to a [`Failure`].
///
/// Two errors are equal when they share the same allocation, or when they
/// hold the same concrete failure type and [`Failure::eq_failure`] accepts
/// the pair.
#[derive(Clone)]
pub struct Error {
    failure: Arc<dyn Failure>,
}

impl Error {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a plain message error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unifunc::error::{Error, MessageError};
    ///
    /// let error = Error::new("disk full");
    /// assert!(error.is::<MessageError>());
    /// assert!(!error.is_exception());
    /// ```
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_failure(MessageError::new(message))
    }

    /// Wraps an arbitrary failure.
    pub fn from_failure<F: Failure>(failure: F) -> Self {
        Self {
            failure: Arc::new(failure),
        }
    }

    /// Wraps a foreign error as an [`ExceptionError`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unifunc::error::{Error, ExceptionError};
    ///
    /// let parse = "x".parse::<i32>().unwrap_err();
    /// let error = Error::exception(parse);
    /// assert!(error.is::<ExceptionError>());
    /// assert!(error.is_exception());
    /// ```
    pub fn exception<E>(exception: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::from_failure(ExceptionError::new(exception))
    }

    /// Tags an error with an enum value.
    pub fn tagged<E>(value: E) -> Self
    where
        E: fmt::Debug + Send + Sync + 'static,
    {
        Self::from_failure(EnumError::new(value))
    }

    /// Classifies a boxed foreign error.
    ///
    /// Errors that already carry an [`Error`] (an `Error` itself or a
    /// [`ResultCastError`]) are unwrapped verbatim; anything else becomes an
    /// [`ExceptionError`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unifunc::error::{Error, ExceptionError, ResultCastError};
    ///
    /// let original = Error::new("boom");
    /// let boxed: Box<dyn std::error::Error + Send + Sync> =
    ///     Box::new(ResultCastError::new(original.clone()));
    /// assert_eq!(Error::classify(boxed), original);
    ///
    /// let io: Box<dyn std::error::Error + Send + Sync> =
    ///     Box::new(std::io::Error::other("socket closed"));
    /// assert!(Error::classify(io).is::<ExceptionError>());
    /// ```
    pub fn classify(error: Box<dyn std::error::Error + Send + Sync + 'static>) -> Self {
        match error.downcast::<ResultCastError>() {
            Ok(cast) => cast.into_error(),
            Err(error) => match error.downcast::<Self>() {
                Ok(error) => *error,
                Err(error) => Self::from_failure(ExceptionError::from_boxed(error)),
            },
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Returns the human readable message of the failure.
    pub fn message(&self) -> String {
        self.failure.to_string()
    }

    /// Returns `true` when the failure is exception-class.
    pub fn is_exception(&self) -> bool {
        self.failure.is_exception()
    }

    /// Returns `true` when the carried failure is of type `F`.
    pub fn is<F: Failure>(&self) -> bool {
        self.as_any().is::<F>()
    }

    /// Returns the carried failure as `F` if the runtime type matches.
    pub fn downcast_ref<F: Failure>(&self) -> Option<&F> {
        self.as_any().downcast_ref::<F>()
    }

    /// Returns the enum tag if this error is an [`EnumError<E>`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unifunc::error::Error;
    ///
    /// #[derive(Debug, Clone, Copy, PartialEq)]
    /// enum Login { UnknownUser, BadPassword }
    ///
    /// let error = Error::tagged(Login::BadPassword);
    /// assert_eq!(error.tag::<Login>(), Some(&Login::BadPassword));
    /// assert_eq!(error.message(), "BadPassword");
    /// ```
    pub fn tag<E>(&self) -> Option<&E>
    where
        E: fmt::Debug + Send + Sync + 'static,
    {
        self.downcast_ref::<EnumError<E>>().map(EnumError::value)
    }

    /// Returns the wrapped foreign error when this is an [`ExceptionError`].
    pub fn exception_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.downcast_ref::<ExceptionError>()
            .map(ExceptionError::exception)
    }

    /// Returns the failure as a trait object.
    pub fn as_failure(&self) -> &dyn Failure {
        self.failure.as_ref()
    }

    fn as_any(&self) -> &dyn Any {
        self.failure.as_ref()
    }

    fn failure_type(&self) -> TypeId {
        self.as_any().type_id()
    }
}

impl<F: Failure> From<F> for Error {
    fn from(failure: F) -> Self {
        Self::from_failure(failure)
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.failure, &other.failure)
            || (self.failure_type() == other.failure_type()
                && self.failure.eq_failure(other.as_failure()))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.failure, formatter)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.failure, formatter)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.failure.source()
    }
}

static_assertions::assert_impl_all!(Error: Send, Sync, Clone);
