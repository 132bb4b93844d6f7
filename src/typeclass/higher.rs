//! Higher-Kinded Type emulation through Generic Associated Types.
//!
//! Rust cannot abstract over `Optional<_>` and `Outcome<_>` as type
//! constructors directly. [`TypeConstructor`] uses a GAT to name "the same
//! container holding another type", which is what [`Functor`](super::Functor)
//! and [`Monad`](super::Monad) need to describe their results.
//!
//! # Example
//!
//! ```rust
//! use unifunc::optional::Optional;
//! use unifunc::typeclass::TypeConstructor;
//!
//! fn emptied<T: TypeConstructor>(_value: T) -> T::WithType<String>
//! where
//!     T::WithType<String>: Default,
//! {
//!     Default::default()
//! }
//!
//! let none: Optional<String> = emptied(Optional::some(42));
//! assert!(none.is_none());
//! ```

use crate::optional::Optional;
use crate::outcome::Outcome;

/// A type constructor applied to the type `Inner`.
pub trait TypeConstructor {
    /// The type currently held by the container.
    type Inner;

    /// The same container holding `B` instead.
    type WithType<B>: TypeConstructor<Inner = B>;
}

impl<A> TypeConstructor for Optional<A> {
    type Inner = A;
    type WithType<B> = Optional<B>;
}

impl<A> TypeConstructor for Outcome<A> {
    type Inner = A;
    type WithType<B> = Outcome<B>;
}
