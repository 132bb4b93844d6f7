#![cfg(feature = "typeclass")]
//! Property-based tests for Monad laws and the traversal combinators.
//!
//! - **Left Identity**: `pure(a).flat_map(f) == f(a)`
//! - **Right Identity**: `m.flat_map(pure) == m`
//! - **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
//!
//! Null collapsing is checked as a law of its own: lifting a nullable source
//! yields `Some` exactly when the source is non-null.

use proptest::prelude::*;
use unifunc::prelude::*;

fn optional_strategy() -> impl Strategy<Value = Optional<i32>> {
    any::<Option<i32>>().prop_map(Optional::from)
}

fn outcome_strategy() -> impl Strategy<Value = Outcome<i32>> {
    prop_oneof![
        any::<i32>().prop_map(Outcome::ok),
        "[a-z]{1,12}".prop_map(|message| Outcome::fail(Error::new(message))),
    ]
}

fn halve(n: i32) -> Optional<i32> {
    when(n % 2 == 0, some(())).map(|()| n / 2)
}

fn decrement(n: i32) -> Optional<i32> {
    n.checked_sub(1).into()
}

fn checked_double(n: i32) -> Outcome<i32> {
    n.checked_mul(2)
        .map_or_else(|| fail(Error::new("overflow")), ok)
}

fn non_negative(n: i32) -> Outcome<i32> {
    if n >= 0 { ok(n) } else { fail(Error::new("negative")) }
}

// =============================================================================
// Optional<A> Property Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_optional_left_identity(a in any::<i32>()) {
        prop_assert_eq!(Optional::<i32>::pure(a).flat_map(halve), halve(a));
    }

    #[test]
    fn prop_optional_right_identity(value in optional_strategy()) {
        prop_assert_eq!(value.flat_map(some), value);
    }

    #[test]
    fn prop_optional_associativity(value in optional_strategy()) {
        let left = value.flat_map(halve).flat_map(decrement);
        let right = value.flat_map(|x| halve(x).flat_map(decrement));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_null_collapsing(source in any::<Option<u16>>()) {
        let lifted = optional(source);
        prop_assert_eq!(lifted.is_some(), source.is_some());
        let lowered: Option<u16> = lifted.into();
        prop_assert_eq!(lowered, source);
    }

    #[test]
    fn prop_traverse_optional_is_all_or_nothing(
        values in prop::collection::vec(any::<i32>(), 0..16)
    ) {
        let traversed = values.iter().copied().traverse_optional(halve);
        let expected = values.iter().all(|n| n % 2 == 0);
        prop_assert_eq!(traversed.is_some(), expected);
        if let Optional::Some(halves) = traversed {
            prop_assert_eq!(halves.len(), values.len());
        }
    }
}

// =============================================================================
// Outcome<A> Property Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_outcome_left_identity(a in any::<i32>()) {
        prop_assert_eq!(Outcome::<i32>::pure(a).flat_map(checked_double), checked_double(a));
    }

    #[test]
    fn prop_outcome_right_identity(value in outcome_strategy()) {
        prop_assert_eq!(value.clone().flat_map(ok), value);
    }

    #[test]
    fn prop_outcome_associativity(value in outcome_strategy()) {
        let left = value.clone().flat_map(checked_double).flat_map(non_negative);
        let right = value.flat_map(|x| checked_double(x).flat_map(non_negative));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_traverse_outcome_matches_first_failure(
        values in prop::collection::vec(-50_i32..50, 0..16)
    ) {
        let traversed = values.iter().copied().traverse_outcome(non_negative);
        if values.iter().any(|n| *n < 0) {
            prop_assert_eq!(traversed, fail(Error::new("negative")));
        } else {
            prop_assert_eq!(traversed, ok(values.clone()));
        }
    }

    #[test]
    fn prop_sequence_and_somes_agree(values in prop::collection::vec(any::<Option<i8>>(), 0..16)) {
        let optionals: Vec<Optional<i8>> = values.iter().copied().map(Optional::from).collect();
        let present: Vec<i8> = optionals.iter().copied().somes().collect();
        let sequenced = optionals.into_iter().sequence_optional();

        if values.iter().all(Option::is_some) {
            prop_assert_eq!(sequenced, some(present));
        } else {
            prop_assert_eq!(sequenced, none());
        }
    }
}
