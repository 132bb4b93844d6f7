//! Applicative type class - combining independent computations.
//!
//! # Laws
//!
//! ## Identity Law
//!
//! ```text
//! pure(|x| x).apply(v) == v
//! ```
//!
//! ## Homomorphism Law
//!
//! ```text
//! pure(f).apply(pure(x)) == pure(f(x))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use unifunc::error::Error;
//! use unifunc::outcome::Outcome;
//! use unifunc::typeclass::Applicative;
//!
//! let width = Outcome::ok(3);
//! let height = Outcome::ok(4);
//! assert_eq!(width.map2(height, |w, h| w * h), Outcome::ok(12));
//!
//! let missing = Outcome::<i32>::fail(Error::new("no height"));
//! assert!(Outcome::ok(3).product(missing).is_fail());
//! ```

use super::functor::Functor;
use crate::optional::Optional;
use crate::outcome::Outcome;

/// A functor that can lift plain values and combine independent containers.
pub trait Applicative: Functor {
    /// Lifts a value into the container.
    fn pure<B>(value: B) -> Self::WithType<B>;

    /// Combines two containers with `function`.
    fn map2<B, C, F>(self, other: Self::WithType<B>, function: F) -> Self::WithType<C>
    where
        F: FnOnce(Self::Inner, B) -> C;

    /// Pairs the values of two containers.
    #[inline]
    fn product<B>(self, other: Self::WithType<B>) -> Self::WithType<(Self::Inner, B)>
    where
        Self: Sized,
    {
        self.map2(other, |a, b| (a, b))
    }

    /// Keeps the left value when both are present.
    #[inline]
    fn product_left<B>(self, other: Self::WithType<B>) -> Self::WithType<Self::Inner>
    where
        Self: Sized,
    {
        self.map2(other, |a, _| a)
    }

    /// Keeps the right value when both are present.
    #[inline]
    fn product_right<B>(self, other: Self::WithType<B>) -> Self::WithType<B>
    where
        Self: Sized,
    {
        self.map2(other, |_, b| b)
    }

    /// Applies a contained function to a contained value.
    fn apply<B, Output>(self, other: Self::WithType<B>) -> Self::WithType<Output>
    where
        Self: Sized,
        Self::Inner: FnOnce(B) -> Output;
}

// =============================================================================
// Optional<A> Implementation
// =============================================================================

impl<A> Applicative for Optional<A> {
    #[inline]
    fn pure<B>(value: B) -> Optional<B> {
        Optional::Some(value)
    }

    #[inline]
    fn map2<B, C, F>(self, other: Optional<B>, function: F) -> Optional<C>
    where
        F: FnOnce(A, B) -> C,
    {
        self.zip_with(other, function)
    }

    #[inline]
    fn apply<B, Output>(self, other: Optional<B>) -> Optional<Output>
    where
        A: FnOnce(B) -> Output,
    {
        self.zip_with(other, |function, b| function(b))
    }
}

// =============================================================================
// Outcome<A> Implementation
// =============================================================================

impl<A> Applicative for Outcome<A> {
    #[inline]
    fn pure<B>(value: B) -> Outcome<B> {
        Outcome::Ok(value)
    }

    /// The left failure wins when both sides failed.
    #[inline]
    fn map2<B, C, F>(self, other: Outcome<B>, function: F) -> Outcome<C>
    where
        F: FnOnce(A, B) -> C,
    {
        match (self, other) {
            (Outcome::Ok(a), Outcome::Ok(b)) => Outcome::Ok(function(a, b)),
            (Outcome::Fail(error), _) | (_, Outcome::Fail(error)) => Outcome::Fail(error),
        }
    }

    #[inline]
    fn apply<B, Output>(self, other: Outcome<B>) -> Outcome<Output>
    where
        A: FnOnce(B) -> Output,
    {
        self.map2(other, |function, b| function(b))
    }
}
