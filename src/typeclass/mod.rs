//! Type class traits implemented by [`Optional`](crate::optional::Optional)
//! and [`Outcome`](crate::outcome::Outcome).
//!
//! - [`Functor`]: mapping over container values
//! - [`Applicative`]: lifting values and combining independent containers
//! - [`Monad`]: sequencing dependent computations
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust does not support higher-kinded types natively. [`TypeConstructor`]
//! emulates them with a Generic Associated Type, so the traits above can name
//! "the same container with another inner type".
//!
//! # Examples
//!
//! ```rust
//! use unifunc::optional::Optional;
//! use unifunc::outcome::Outcome;
//! use unifunc::typeclass::{Applicative, Functor, Monad};
//!
//! fn total<M>(left: M, right: M::WithType<i32>) -> M::WithType<i32>
//! where
//!     M: Applicative<Inner = i32>,
//! {
//!     left.map2(right, |a, b| a + b)
//! }
//!
//! assert_eq!(total(Optional::some(1), Optional::some(2)), Optional::some(3));
//! assert_eq!(total(Outcome::ok(1), Outcome::ok(2)), Outcome::ok(3));
//! assert_eq!(Outcome::ok(2).fmap(|n| n * 5).flat_map(Outcome::ok), Outcome::ok(10));
//! ```

mod applicative;
mod functor;
mod higher;
mod monad;

pub use applicative::Applicative;
pub use functor::Functor;
pub use higher::TypeConstructor;
pub use monad::Monad;
