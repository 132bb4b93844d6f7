//! # unifunc
//!
//! Value containers for optional and fallible computations, with a
//! polymorphic error model and a memoized asynchronous outcome.
//!
//! ## Overview
//!
//! - **[`Optional<T>`](optional::Optional)**: zero or one value; null sources
//!   collapse to `None`
//! - **[`Outcome<T>`](outcome::Outcome)**: a success value or a typed
//!   [`Error`](error::Error)
//! - **[`AsyncOutcome<T>`](future::AsyncOutcome)** and
//!   **[`AsyncOptional<T>`](future::AsyncOptional)**: lazily evaluated,
//!   single-resolution asynchronous `Outcome` and `Optional`, with retry and
//!   cancellation
//! - **[`error`]**: message, exception, compound and enum-tagged failures
//! - **[`OutcomeMatcher`](outcome::OutcomeMatcher)**: reusable, type-directed
//!   failure handlers
//! - **[`Try`](attempt::Try)**: the boundary that turns panics and foreign
//!   errors into `Outcome`s
//! - **[`sequence`]**: traversal and safe lookups over iterators and collections
//!
//! ## Feature Flags
//!
//! - `typeclass`: Functor, Applicative and Monad implementations (default)
//! - `async`: `AsyncOutcome`, retry and cancellation via `tokio`/`futures` (default)
//! - `serde`: serialization of `Optional` and `Outcome`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use unifunc::prelude::*;
//!
//! fn port(raw: &str) -> Outcome<u16> {
//!     parse_optional::<u16>(raw)
//!         .filter(|port| *port >= 1024)
//!         .to_outcome_with(|| Error::new(format!("invalid port: {raw}")))
//! }
//!
//! assert_eq!(port("8080"), ok(8080));
//! assert_eq!(port("80").error().map(Error::message), Some("invalid port: 80".to_string()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the containers, the error model, the combinator traits and the
/// constructor shorthands.
///
/// # Usage
///
/// ```rust
/// use unifunc::prelude::*;
/// ```
pub mod prelude {
    pub use crate::attempt::Try;
    pub use crate::error::{CompoundError, EnumError, Error, ExceptionError, Failure};
    pub use crate::functions::*;
    pub use crate::optional::{Nullable, Optional};
    pub use crate::outcome::{Outcome, OutcomeMatcher};
    pub use crate::sequence::{SequenceExt, SliceExt, TryGetValue, non_empty, parse_optional};

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "async")]
    pub use crate::future::{AsyncOptional, AsyncOutcome, RetryPolicy, retry};
}

pub mod attempt;
pub mod error;
pub mod functions;
pub mod optional;
pub mod outcome;
pub mod sequence;

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "async")]
pub mod future;
