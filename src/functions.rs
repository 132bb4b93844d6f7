//! Stateless constructor shorthands, re-exported by the [`prelude`](crate::prelude).
//!
//! # Examples
//!
//! ```rust
//! use unifunc::prelude::*;
//!
//! let name = optional(Some("ada"));
//! assert_eq!(name, some("ada"));
//!
//! let checked: Outcome<()> = when(name.is_none(), fail(Error::new("missing name")));
//! assert_eq!(checked, ok(()));
//! ```

use crate::error::Error;
use crate::optional::{Nullable, Optional};
use crate::outcome::Outcome;

/// Wraps a present value.
#[inline]
pub const fn some<T>(value: T) -> Optional<T> {
    Optional::Some(value)
}

/// An absent value.
#[inline]
pub const fn none<T>() -> Optional<T> {
    Optional::None
}

/// Lifts a nullable source, collapsing null to `None`.
#[inline]
pub fn optional<N: Nullable>(value: N) -> Optional<N::Target> {
    Optional::from_nullable(value)
}

/// A success.
#[inline]
pub const fn ok<T>(value: T) -> Outcome<T> {
    Outcome::Ok(value)
}

/// A failure.
#[inline]
pub fn fail<T>(error: impl Into<Error>) -> Outcome<T> {
    Outcome::Fail(error.into())
}

/// A unit container that can stand in for "nothing to do".
pub trait Guard: Sized {
    /// The value returned by [`when`] when its condition is false.
    fn skipped() -> Self;
}

impl Guard for Optional<()> {
    fn skipped() -> Self {
        Self::None
    }
}

impl Guard for Outcome<()> {
    fn skipped() -> Self {
        Self::Ok(())
    }
}

/// Returns `alternative` when `condition` holds, otherwise the skipped value
/// (`None` for `Optional`, `Ok(())` for `Outcome`).
#[inline]
pub fn when<G: Guard>(condition: bool, alternative: G) -> G {
    if condition { alternative } else { G::skipped() }
}

/// Returns `alternative` unless `condition` holds.
#[inline]
pub fn unless<G: Guard>(condition: bool, alternative: G) -> G {
    when(!condition, alternative)
}
