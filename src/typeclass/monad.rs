//! Monad type class - sequencing dependent computations.
//!
//! # Laws
//!
//! ## Left Identity Law
//!
//! ```text
//! Self::pure(a).flat_map(f) == f(a)
//! ```
//!
//! ## Right Identity Law
//!
//! ```text
//! m.flat_map(Self::pure) == m
//! ```
//!
//! ## Associativity Law
//!
//! ```text
//! m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use unifunc::optional::Optional;
//! use unifunc::typeclass::Monad;
//!
//! fn positive(input: &str) -> Optional<i32> {
//!     Optional::from(input.parse::<i32>().ok()).filter(|n| *n > 0)
//! }
//!
//! let result = Optional::some("42").flat_map(positive).flat_map(|n| Optional::some(n * 2));
//! assert_eq!(result, Optional::some(84));
//! ```

use super::applicative::Applicative;
use crate::optional::Optional;
use crate::outcome::Outcome;

/// An applicative whose computations can depend on earlier results.
pub trait Monad: Applicative {
    /// Chains a computation that depends on the inner value.
    fn flat_map<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> Self::WithType<B>;

    /// Alias for [`flat_map`](Self::flat_map).
    #[inline]
    fn and_then<B, F>(self, function: F) -> Self::WithType<B>
    where
        Self: Sized,
        F: FnOnce(Self::Inner) -> Self::WithType<B>,
    {
        self.flat_map(function)
    }

    /// Sequences `next` after `self`, discarding the inner value.
    #[inline]
    fn then<B>(self, next: Self::WithType<B>) -> Self::WithType<B>
    where
        Self: Sized,
    {
        self.flat_map(|_| next)
    }
}

impl<A> Monad for Optional<A> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Optional<B>
    where
        F: FnOnce(A) -> Optional<B>,
    {
        self.bind(function)
    }
}

impl<A> Monad for Outcome<A> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Outcome<B>
    where
        F: FnOnce(A) -> Outcome<B>,
    {
        self.bind(function)
    }
}
