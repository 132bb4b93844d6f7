//! Errors raised when the containers themselves are misused.
//!
//! These are not failures carried by an outcome; they are returned in a
//! `std::result::Result` from the operations that can be called incorrectly.

use super::Error;

/// A null value was passed where a present value is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("argument `{name}` must not be null")]
pub struct InvalidArgumentError {
    name: &'static str,
}

impl InvalidArgumentError {
    /// Creates the error for the named argument.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Returns the argument name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// An operation was called in a state that does not support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidOperationError {
    /// A typed error match found a failure of another type.
    #[error("no error match: expected `{expected}`")]
    NoErrorMatch {
        /// The type name the caller asked for.
        expected: &'static str,
    },
    /// A default-constructed async outcome was observed.
    #[error("async outcome is uninitialized")]
    UninitializedAsyncOutcome,
}

/// Forced unwrap of an absent `Optional`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, thiserror::Error)]
#[error("Option is None")]
pub struct OptionCastError;

/// Forced unwrap of a failed `Outcome`; carries the original error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Result Fail with {error}")]
pub struct ResultCastError {
    error: Error,
}

impl ResultCastError {
    /// Wraps the error of the failed outcome.
    pub const fn new(error: Error) -> Self {
        Self { error }
    }

    /// Returns the carried error.
    pub const fn error(&self) -> &Error {
        &self.error
    }

    /// Consumes the cast error, returning the carried error.
    pub fn into_error(self) -> Error {
        self.error
    }
}
