//! Optional type - zero or one value.
//!
//! This module provides the `Optional<T>` type, a tagged container that is
//! either `Some(T)` or `None`. It carries no error detail: absence is untyped.
//! Use [`Outcome`] when the reason for a missing value matters.
//!
//! Rust values are never null, so the null-collapsing rule lives at the
//! boundary where a nullable source is lifted: [`Optional::from_nullable`]
//! turns a null (an empty `Option`, a dead `Weak`) into `None` instead of a
//! present-but-null value.
//!
//! # Examples
//!
//! ```rust
//! use unifunc::optional::Optional;
//!
//! let port = Optional::some("8080")
//!     .map(str::parse::<u16>)
//!     .bind(|parsed| Optional::from(parsed.ok()))
//!     .filter(|port| *port > 1024);
//! assert_eq!(port, Optional::some(8080));
//!
//! let label = port.fold(|port| format!("port {port}"), || "no port".to_string());
//! assert_eq!(label, "port 8080");
//! ```

use std::any::Any;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::BitOr;

use crate::error::{Error, InvalidArgumentError, OptionCastError};
use crate::outcome::Outcome;

// =============================================================================
// Nullable sources
// =============================================================================

/// A source that may hold a null reference.
///
/// Implemented for the std types that model nullability: `Option<T>`, and
/// `Weak` pointers whose referent may already have been dropped.
pub trait Nullable {
    /// The non-null payload type.
    type Target;

    /// Returns the payload, or `None` when the source is null.
    fn into_non_null(self) -> Option<Self::Target>;
}

impl<T> Nullable for Option<T> {
    type Target = T;

    #[inline]
    fn into_non_null(self) -> Option<T> {
        self
    }
}

impl<T> Nullable for std::rc::Weak<T> {
    type Target = std::rc::Rc<T>;

    #[inline]
    fn into_non_null(self) -> Option<std::rc::Rc<T>> {
        self.upgrade()
    }
}

impl<T> Nullable for std::sync::Weak<T> {
    type Target = std::sync::Arc<T>;

    #[inline]
    fn into_non_null(self) -> Option<std::sync::Arc<T>> {
        self.upgrade()
    }
}

// =============================================================================
// Optional
// =============================================================================

/// Zero or one value of type `T`.
///
/// The default value is `None`.
///
/// # Examples
///
/// ```rust
/// use unifunc::optional::Optional;
///
/// let present = Optional::some(3);
/// assert!(present.is_some());
/// assert!(present.contains(&3));
///
/// let absent: Optional<i32> = Optional::default();
/// assert!(absent.is_none());
/// assert_eq!(absent.if_none(7), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Optional<T> {
    /// No value.
    #[default]
    None,
    /// A present value.
    Some(T),
}

impl<T> Optional<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a present value.
    #[inline]
    pub const fn some(value: T) -> Self {
        Self::Some(value)
    }

    /// Creates an absent value.
    #[inline]
    pub const fn none() -> Self {
        Self::None
    }

    /// Lifts a nullable source, collapsing null to `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::rc::Rc;
    /// use unifunc::optional::Optional;
    ///
    /// let owner = Rc::new("player");
    /// let weak = Rc::downgrade(&owner);
    /// assert!(Optional::from_nullable(weak.clone()).is_some());
    ///
    /// drop(owner);
    /// assert!(Optional::from_nullable(weak).is_none());
    /// ```
    #[inline]
    pub fn from_nullable<N>(value: N) -> Self
    where
        N: Nullable<Target = T>,
    {
        value.into_non_null().map_or(Self::None, Self::Some)
    }

    /// Creates a present value from a nullable source, rejecting null.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError`] when `value` is null.
    pub fn try_some<N>(value: N) -> Result<Self, InvalidArgumentError>
    where
        N: Nullable<Target = T>,
    {
        value
            .into_non_null()
            .map(Self::Some)
            .ok_or(InvalidArgumentError::new("value"))
    }

    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` if a value is present.
    #[inline]
    pub const fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    /// Returns `true` if no value is present.
    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` if a value is present and equal to `value`.
    #[inline]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        matches!(self, Self::Some(present) if present == value)
    }

    // =========================================================================
    // Reference Extraction
    // =========================================================================

    /// Borrows the payload.
    #[inline]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Some(value) => Some(value),
            Self::None => None,
        }
    }

    /// Converts `&Optional<T>` into `Optional<&T>`.
    #[inline]
    pub const fn as_ref(&self) -> Optional<&T> {
        match self {
            Self::Some(value) => Optional::Some(value),
            Self::None => Optional::None,
        }
    }

    // =========================================================================
    // Mapping Operations
    // =========================================================================

    /// Applies `function` to a present value.
    ///
    /// `function` runs at most once, and only when a value is present.
    #[inline]
    pub fn map<U, F>(self, function: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Some(value) => Optional::Some(function(value)),
            Self::None => Optional::None,
        }
    }

    /// Maps with a function returning a nullable value, collapsing null.
    #[inline]
    pub fn map_nullable<N, F>(self, function: F) -> Optional<N::Target>
    where
        N: Nullable,
        F: FnOnce(T) -> N,
    {
        match self {
            Self::Some(value) => Optional::from_nullable(function(value)),
            Self::None => Optional::None,
        }
    }

    /// Chains a computation that may itself be absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unifunc::optional::Optional;
    ///
    /// fn half(value: i32) -> Optional<i32> {
    ///     if value % 2 == 0 { Optional::some(value / 2) } else { Optional::none() }
    /// }
    ///
    /// assert_eq!(Optional::some(8).bind(half).bind(half), Optional::some(2));
    /// assert_eq!(Optional::some(6).bind(half).bind(half), Optional::none());
    /// ```
    #[inline]
    pub fn bind<U, F>(self, function: F) -> Optional<U>
    where
        F: FnOnce(T) -> Optional<U>,
    {
        match self {
            Self::Some(value) => function(value),
            Self::None => Optional::None,
        }
    }

    /// Keeps a present value only if `predicate` accepts it.
    #[inline]
    #[must_use]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Some(value) if predicate(&value) => Self::Some(value),
            _ => Self::None,
        }
    }

    /// Keeps a present value only if its runtime type is `U`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unifunc::optional::Optional;
    ///
    /// assert_eq!(Optional::some(5_u8).try_cast::<u8>(), Optional::some(5_u8));
    /// assert_eq!(Optional::some(5_u8).try_cast::<i64>(), Optional::none());
    /// ```
    pub fn try_cast<U: 'static>(self) -> Optional<U>
    where
        T: 'static,
    {
        match self {
            Self::Some(value) => {
                let boxed: Box<dyn Any> = Box::new(value);
                boxed
                    .downcast::<U>()
                    .map_or(Optional::None, |cast| Optional::Some(*cast))
            }
            Self::None => Optional::None,
        }
    }

    /// Combines two present values; `None` if either is absent.
    #[inline]
    pub fn zip_with<U, R, F>(self, other: Optional<U>, function: F) -> Optional<R>
    where
        F: FnOnce(T, U) -> R,
    {
        match (self, other) {
            (Self::Some(left), Optional::Some(right)) => Optional::Some(function(left, right)),
            _ => Optional::None,
        }
    }

    /// Returns `self` if present, otherwise `other`.
    #[inline]
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Some(_) => self,
            Self::None => other,
        }
    }

    // =========================================================================
    // Elimination
    // =========================================================================

    /// Eliminates the `Optional`; exactly one branch runs.
    #[inline]
    pub fn fold<U, S, N>(self, on_some: S, on_none: N) -> U
    where
        S: FnOnce(T) -> U,
        N: FnOnce() -> U,
    {
        match self {
            Self::Some(value) => on_some(value),
            Self::None => on_none(),
        }
    }

    /// Returns the payload or `fallback`.
    #[inline]
    pub fn if_none(self, fallback: T) -> T {
        match self {
            Self::Some(value) => value,
            Self::None => fallback,
        }
    }

    /// Returns the payload or the result of `fallback`, computed only when absent.
    #[inline]
    pub fn if_none_with<F>(self, fallback: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Some(value) => value,
            Self::None => fallback(),
        }
    }

    /// Returns the payload or `T::default()`.
    #[inline]
    pub fn if_none_default(self) -> T
    where
        T: Default,
    {
        self.if_none_with(T::default)
    }

    /// Forced unwrap.
    ///
    /// # Errors
    ///
    /// Returns [`OptionCastError`] when no value is present.
    #[inline]
    pub fn into_value(self) -> Result<T, OptionCastError> {
        match self {
            Self::Some(value) => Ok(value),
            Self::None => Err(OptionCastError),
        }
    }

    // =========================================================================
    // Side Effects
    // =========================================================================

    /// Runs `action` on a present value.
    #[inline]
    pub fn for_some<F>(self, action: F)
    where
        F: FnOnce(T),
    {
        if let Self::Some(value) = self {
            action(value);
        }
    }

    /// Runs `action` on a present value and returns `self` unchanged.
    #[inline]
    #[must_use]
    pub fn tee<F>(self, action: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Self::Some(value) = &self {
            action(value);
        }
        self
    }

    // =========================================================================
    // Conversion Operations
    // =========================================================================

    /// Promotes to an `Outcome`, failing with `error` when absent.
    #[inline]
    pub fn to_outcome(self, error: impl Into<Error>) -> Outcome<T> {
        match self {
            Self::Some(value) => Outcome::Ok(value),
            Self::None => Outcome::Fail(error.into()),
        }
    }

    /// Promotes to an `Outcome`, building the error only when absent.
    #[inline]
    pub fn to_outcome_with<F>(self, error: F) -> Outcome<T>
    where
        F: FnOnce() -> Error,
    {
        match self {
            Self::Some(value) => Outcome::Ok(value),
            Self::None => Outcome::Fail(error()),
        }
    }

    /// Iterates over zero or one borrowed value.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            value: self.value(),
        }
    }
}

impl<T> Optional<Optional<T>> {
    /// Removes one level of nesting.
    #[inline]
    pub fn flatten(self) -> Optional<T> {
        self.bind(|inner| inner)
    }
}

impl Optional<()> {
    /// Returns `alternative` when `condition` holds, otherwise `None`.
    #[inline]
    #[must_use]
    pub fn when(condition: bool, alternative: Self) -> Self {
        if condition { alternative } else { Self::None }
    }

    /// Returns `alternative` unless `condition` holds.
    #[inline]
    #[must_use]
    pub fn unless(condition: bool, alternative: Self) -> Self {
        Self::when(!condition, alternative)
    }
}

// =============================================================================
// Operators and Formatting
// =============================================================================

impl<T> BitOr for Optional<T> {
    type Output = Self;

    #[inline]
    fn bitor(self, other: Self) -> Self {
        self.or(other)
    }
}

impl<T: fmt::Display> fmt::Display for Optional<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Some(value) => write!(formatter, "Some({value})"),
            Self::None => write!(formatter, "None"),
        }
    }
}

// =============================================================================
// From Implementations
// =============================================================================

impl<T> From<Option<T>> for Optional<T> {
    #[inline]
    fn from(option: Option<T>) -> Self {
        Self::from_nullable(option)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    #[inline]
    fn from(optional: Optional<T>) -> Self {
        match optional {
            Optional::Some(value) => Some(value),
            Optional::None => None,
        }
    }
}

// =============================================================================
// Iteration
// =============================================================================

/// Borrowing iterator over an [`Optional`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    value: Option<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.value.take()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.value.is_some());
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over an [`Optional`].
#[derive(Debug, Clone)]
pub struct IntoIter<T> {
    value: Option<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.value.take()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.value.is_some());
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Optional<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            value: self.into(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Optional<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Optional<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Some(value) => value.serialize(serializer),
            Self::None => serializer.serialize_none(),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Optional<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
