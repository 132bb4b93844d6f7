//! Built-in failure types.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::{Error, Failure};

// =============================================================================
// Message
// =============================================================================

/// A failure described by a message only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MessageError {
    message: String,
}

impl MessageError {
    /// Creates a message failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Failure for MessageError {}

// =============================================================================
// Exception
// =============================================================================

/// A failure wrapping a foreign `std::error::Error`.
///
/// The message is the wrapped error's `Display` output.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{exception}")]
pub struct ExceptionError {
    exception: Arc<dyn std::error::Error + Send + Sync + 'static>,
}

impl ExceptionError {
    /// Wraps a foreign error.
    pub fn new<E>(exception: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            exception: Arc::new(exception),
        }
    }

    /// Wraps an already boxed foreign error.
    pub fn from_boxed(exception: Box<dyn std::error::Error + Send + Sync + 'static>) -> Self {
        Self {
            exception: Arc::from(exception),
        }
    }

    /// Returns the wrapped error.
    pub fn exception(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.exception.as_ref()
    }

    /// Returns the wrapped error as `E` if the runtime type matches.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.exception.downcast_ref::<E>()
    }
}

impl Failure for ExceptionError {
    fn is_exception(&self) -> bool {
        true
    }

    /// Wrapped errors are equal when they render identically with `Debug`.
    fn eq_failure(&self, other: &dyn Failure) -> bool {
        (other as &dyn Any)
            .downcast_ref::<Self>()
            .is_some_and(|other| {
                Arc::ptr_eq(&self.exception, &other.exception)
                    || format!("{:?}", self.exception) == format!("{:?}", other.exception)
            })
    }
}

// =============================================================================
// Compound
// =============================================================================

/// An ordered collection of failures, for example one per invalid field.
///
/// The message is always `"Multiple errors"`; inspect [`errors`](Self::errors)
/// for the details.
///
/// # Examples
///
/// ```rust
/// use unifunc::error::{CompoundError, Error};
///
/// let compound = CompoundError::new(Error::new("name is empty"))
///     .add(Error::new("age is negative"));
///
/// assert_eq!(compound.errors().len(), 2);
/// assert_eq!(Error::from(compound).message(), "Multiple errors");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Multiple errors")]
pub struct CompoundError {
    errors: Vec<Error>,
}

impl CompoundError {
    /// Creates a compound error holding its first constituent.
    pub fn new(first: Error) -> Self {
        Self {
            errors: vec![first],
        }
    }

    /// Collects errors into a compound error; `None` when `errors` is empty.
    pub fn from_errors<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Error>,
    {
        let errors: Vec<Error> = errors.into_iter().collect();
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Appends an error, keeping registration order.
    #[must_use]
    pub fn add(mut self, error: Error) -> Self {
        self.errors.push(error);
        self
    }

    /// Returns the constituent errors in the order they were added.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }
}

impl Failure for CompoundError {
    fn eq_failure(&self, other: &dyn Failure) -> bool {
        (other as &dyn Any)
            .downcast_ref::<Self>()
            .is_some_and(|other| self.errors == other.errors)
    }
}

// =============================================================================
// Enum tag
// =============================================================================

/// A failure tagged with a value from a closed enum vocabulary.
///
/// The message is the `Debug` rendering of the value, which is the variant
/// name for field-less enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{value:?}")]
pub struct EnumError<E: fmt::Debug> {
    value: E,
}

impl<E: fmt::Debug> EnumError<E> {
    /// Creates a tagged failure.
    pub const fn new(value: E) -> Self {
        Self { value }
    }

    /// Returns the tag.
    pub const fn value(&self) -> &E {
        &self.value
    }
}

impl<E> Failure for EnumError<E> where E: fmt::Debug + Send + Sync + 'static {}

// =============================================================================
// Unit failures
// =============================================================================

/// Produced by `try_cast` when the payload is not of the requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, thiserror::Error)]
#[error("Invalid cast")]
pub struct InvalidCast;

impl Failure for InvalidCast {}

/// Produced by `Outcome::filter` when the predicate rejects the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, thiserror::Error)]
#[error("Filter error")]
pub struct PredicateFailed;

impl Failure for PredicateFailed {}

/// Carried by a default-constructed `Outcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, thiserror::Error)]
#[error("Uninitialized outcome")]
pub struct Uninitialized;

impl Failure for Uninitialized {}

/// An absent `Optional` promoted into a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, thiserror::Error)]
#[error("Option is None")]
pub struct NoneOptionError;

impl Failure for NoneOptionError {}

/// A cooperative cancellation of an in-flight operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, thiserror::Error)]
#[error("Operation was cancelled")]
pub struct CancellationError;

impl Failure for CancellationError {}

// =============================================================================
// Panic
// =============================================================================

/// A panic caught at a `Try` or async boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("panicked: {message}")]
pub struct PanicError {
    message: String,
}

impl PanicError {
    /// Builds the failure from a `catch_unwind` payload.
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        Self { message }
    }

    /// Returns the panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Failure for PanicError {
    fn is_exception(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn compound_error_keeps_order() {
        let compound = CompoundError::new(Error::new("a"))
            .add(Error::new("b"))
            .add(Error::new("c"));
        let messages: Vec<String> = compound.errors().iter().map(Error::message).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
        assert_eq!(compound.to_string(), "Multiple errors");
    }

    #[rstest]
    fn compound_error_from_empty_is_none() {
        assert!(CompoundError::from_errors(Vec::new()).is_none());
        assert!(CompoundError::from_errors(vec![Error::new("a")]).is_some());
    }

    #[rstest]
    #[case(Error::from(InvalidCast), "Invalid cast")]
    #[case(Error::from(PredicateFailed), "Filter error")]
    #[case(Error::from(Uninitialized), "Uninitialized outcome")]
    #[case(Error::from(NoneOptionError), "Option is None")]
    #[case(Error::from(CancellationError), "Operation was cancelled")]
    fn unit_failure_messages(#[case] error: Error, #[case] expected: &str) {
        assert_eq!(error.message(), expected);
        assert!(!error.is_exception());
    }

    #[rstest]
    fn panic_error_reads_str_and_string_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(PanicError::from_payload(payload.as_ref()).message(), "static");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(PanicError::from_payload(payload.as_ref()).message(), "owned");

        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(
            PanicError::from_payload(payload.as_ref()).message(),
            "unknown panic payload"
        );
    }

    #[rstest]
    fn exception_error_downcasts_wrapped_error() {
        let exception = ExceptionError::new(std::io::Error::other("closed"));
        assert!(exception.downcast_ref::<std::io::Error>().is_some());
        assert!(exception.downcast_ref::<std::fmt::Error>().is_none());
        assert!(Error::from(exception).is_exception());
    }
}
