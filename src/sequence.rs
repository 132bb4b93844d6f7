//! Combinators over iterators and collections that produce [`Optional`] and
//! [`Outcome`] values.
//!
//! [`SequenceExt`] is implemented for every iterator and supplies traversal,
//! folding and safe lookups. [`TryGetValue`] and [`SliceExt`] turn the
//! `Option`-returning lookups of the standard collections into `Optional`s.
//!
//! Traversals short-circuit: the first absent element (or the first failure)
//! ends iteration, and no further elements are mapped.
//!
//! # Examples
//!
//! ```rust
//! use unifunc::optional::Optional;
//! use unifunc::sequence::{SequenceExt, parse_optional};
//!
//! let parsed = ["1", "2", "3"].into_iter().traverse_optional(parse_optional::<i32>);
//! assert_eq!(parsed, Optional::some(vec![1, 2, 3]));
//!
//! let broken = ["1", "x", "3"].into_iter().traverse_optional(parse_optional::<i32>);
//! assert_eq!(broken, Optional::none());
//! ```

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::str::FromStr;

use crate::optional::Optional;
use crate::outcome::Outcome;

// =============================================================================
// Iterator extension
// =============================================================================

/// Extension methods for any iterator.
pub trait SequenceExt: Iterator + Sized {
    /// Maps every element to an `Optional`, collecting the values when all are present.
    fn traverse_optional<U, F>(self, function: F) -> Optional<Vec<U>>
    where
        F: FnMut(Self::Item) -> Optional<U>,
    {
        self.map(function)
            .map(Option::from)
            .collect::<Option<Vec<U>>>()
            .into()
    }

    /// Maps every element to an `Outcome`, collecting the values or returning
    /// the first failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unifunc::error::Error;
    /// use unifunc::outcome::Outcome;
    /// use unifunc::sequence::SequenceExt;
    ///
    /// let checked = [3, -1, -2].into_iter().traverse_outcome(|value| {
    ///     if value >= 0 {
    ///         Outcome::ok(value)
    ///     } else {
    ///         Outcome::fail(Error::new(format!("negative: {value}")))
    ///     }
    /// });
    /// assert_eq!(checked, Outcome::fail(Error::new("negative: -1")));
    /// ```
    fn traverse_outcome<U, F>(self, function: F) -> Outcome<Vec<U>>
    where
        F: FnMut(Self::Item) -> Outcome<U>,
    {
        self.map(function)
            .map(Outcome::into_result)
            .collect::<Result<Vec<U>, _>>()
            .into()
    }

    /// Collects a sequence of `Optional`s.
    fn sequence_optional<T>(self) -> Optional<Vec<T>>
    where
        Self: Iterator<Item = Optional<T>>,
    {
        self.traverse_optional(|optional| optional)
    }

    /// Collects a sequence of `Outcome`s.
    fn sequence_outcome<T>(self) -> Outcome<Vec<T>>
    where
        Self: Iterator<Item = Outcome<T>>,
    {
        self.traverse_outcome(|outcome| outcome)
    }

    /// Folds with a fallible step, stopping at the first failure.
    ///
    /// A failed `seed` is returned as is without consuming the iterator.
    fn fold_outcome<U, F>(self, seed: Outcome<U>, mut step: F) -> Outcome<U>
    where
        F: FnMut(U, Self::Item) -> Outcome<U>,
    {
        let mut accumulator = match seed {
            Outcome::Ok(value) => value,
            failed @ Outcome::Fail(_) => return failed,
        };
        for item in self {
            match step(accumulator, item) {
                Outcome::Ok(value) => accumulator = value,
                failed @ Outcome::Fail(_) => return failed,
            }
        }
        Outcome::Ok(accumulator)
    }

    /// Keeps the present values.
    fn somes<T>(self) -> impl Iterator<Item = T>
    where
        Self: Iterator<Item = Optional<T>>,
    {
        self.flatten()
    }

    /// Keeps the success values.
    fn oks<T>(self) -> impl Iterator<Item = T>
    where
        Self: Iterator<Item = Outcome<T>>,
    {
        self.flatten()
    }

    /// The first element, if any.
    fn try_first(mut self) -> Optional<Self::Item> {
        self.next().into()
    }

    /// The first element accepted by `predicate`.
    fn try_first_by<P>(mut self, predicate: P) -> Optional<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.find(predicate).into()
    }

    /// The only element; `None` when empty or when there is more than one.
    fn try_single(mut self) -> Optional<Self::Item> {
        match (self.next(), self.next()) {
            (Some(single), None) => Optional::Some(single),
            _ => Optional::None,
        }
    }

    /// The only element accepted by `predicate`; `None` when no element or
    /// more than one element matches.
    fn try_single_by<P>(self, mut predicate: P) -> Optional<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.filter(|item| predicate(item)).try_single()
    }
}

impl<I: Iterator> SequenceExt for I {}

// =============================================================================
// Collections
// =============================================================================

/// Key lookup returning an [`Optional`].
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use unifunc::optional::Optional;
/// use unifunc::sequence::TryGetValue;
///
/// let mut scores: HashMap<i32, i32> = HashMap::new();
/// assert_eq!(scores.try_get_value(&1), Optional::none());
///
/// scores.insert(1, 3);
/// assert_eq!(scores.try_get_value(&1), Optional::some(&3));
/// ```
pub trait TryGetValue<Q: ?Sized> {
    /// The value type stored in the collection.
    type Value;

    /// Looks up `key`.
    fn try_get_value(&self, key: &Q) -> Optional<&Self::Value>;
}

impl<K, V, Q, S> TryGetValue<Q> for HashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    type Value = V;

    fn try_get_value(&self, key: &Q) -> Optional<&V> {
        self.get(key).into()
    }
}

impl<K, V, Q> TryGetValue<Q> for BTreeMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Value = V;

    fn try_get_value(&self, key: &Q) -> Optional<&V> {
        self.get(key).into()
    }
}

/// Slice lookups returning [`Optional`]s.
pub trait SliceExt<T> {
    /// The element at `index`.
    fn try_get(&self, index: usize) -> Optional<&T>;

    /// The first element accepted by `predicate`.
    fn try_find<P>(&self, predicate: P) -> Optional<&T>
    where
        P: FnMut(&T) -> bool;

    /// The index of the first element accepted by `predicate`.
    fn try_find_index<P>(&self, predicate: P) -> Optional<usize>
    where
        P: FnMut(&T) -> bool;
}

impl<T> SliceExt<T> for [T] {
    fn try_get(&self, index: usize) -> Optional<&T> {
        self.get(index).into()
    }

    fn try_find<P>(&self, mut predicate: P) -> Optional<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|item| predicate(item)).into()
    }

    fn try_find_index<P>(&self, predicate: P) -> Optional<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(predicate).into()
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses `input`, discarding the parse error.
pub fn parse_optional<T: FromStr>(input: &str) -> Optional<T> {
    input.parse().ok().into()
}

/// `Some(input)` unless `input` is empty.
pub fn non_empty(input: &str) -> Optional<&str> {
    if input.is_empty() {
        Optional::None
    } else {
        Optional::Some(input)
    }
}
