//! Integration tests for `Optional<T>`.
//!
//! Covers the null-collapsing construction rule, total elimination,
//! iteration as a zero-or-one sequence, and the promotions to `Outcome`.

use std::collections::HashMap;
use std::rc::Rc;

use rstest::rstest;
use unifunc::error::{Error, InvalidArgumentError, OptionCastError};
use unifunc::prelude::*;

// =============================================================================
// Construction
// =============================================================================

#[rstest]
#[case(Some(1), true)]
#[case(None, false)]
fn optional_applies_null_collapsing(#[case] source: Option<i32>, #[case] present: bool) {
    assert_eq!(optional(source).is_some(), present);
}

#[rstest]
fn some_of_value_unwraps_to_the_same_value() {
    let value = "payload".to_string();
    assert_eq!(some(value.clone()).into_value(), Ok(value));
}

#[rstest]
fn try_some_rejects_null_source() {
    assert_eq!(
        Optional::<i32>::try_some(None::<i32>),
        Err(InvalidArgumentError::new("value"))
    );
}

#[rstest]
fn dropped_referent_reads_as_none() {
    let component = Rc::new("collider");
    let handle = Rc::downgrade(&component);
    let lookup = || optional(handle.clone()).map(|found| found.len());

    assert_eq!(lookup(), some(8));
    drop(component);
    assert_eq!(lookup(), none());
}

#[rstest]
fn forced_unwrap_of_none_signals_absence() {
    assert_eq!(none::<i32>().into_value(), Err(OptionCastError));
    assert_eq!(OptionCastError.to_string(), "Option is None");
}

// =============================================================================
// Composition
// =============================================================================

#[rstest]
fn chained_lookup_and_validation() {
    let mut inventory: HashMap<&str, u32> = HashMap::new();
    inventory.insert("potion", 3);

    let usable = |item: &str| {
        inventory
            .try_get_value(item)
            .map(|count| *count)
            .filter(|count| *count > 0)
    };

    assert_eq!(usable("potion"), some(3));
    assert_eq!(usable("elixir"), none());
}

#[rstest]
fn fold_requires_both_branches() {
    let describe =
        |value: Optional<i32>| value.fold(|v| format!("got {v}"), || "nothing".to_string());
    assert_eq!(describe(some(2)), "got 2");
    assert_eq!(describe(none()), "nothing");
}

#[rstest]
fn iteration_is_repeatable() {
    let value = some(5);
    let first: Vec<&i32> = value.iter().collect();
    let second: Vec<&i32> = (&value).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(first, vec![&5]);

    let mut visits = 0;
    for _ in none::<i32>() {
        visits += 1;
    }
    assert_eq!(visits, 0);
}

#[rstest]
fn promoted_none_carries_given_error() {
    let outcome = none::<i32>().to_outcome(Error::new("not found"));
    assert_eq!(outcome, fail(Error::new("not found")));
}

#[rstest]
fn conversions_with_std_option() {
    let std_option: Option<i32> = some(4).into();
    assert_eq!(std_option, Some(4));
    assert_eq!(Optional::from(Some(4)), some(4));
}

#[rstest]
fn ordering_places_none_first() {
    let mut values = vec![some(3), none(), some(1)];
    values.sort();
    assert_eq!(values, vec![none(), some(1), some(3)]);
}
