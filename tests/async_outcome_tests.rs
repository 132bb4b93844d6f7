#![cfg(feature = "async")]
//! Integration tests for `AsyncOutcome<T>`.
//!
//! Tests cover:
//! - Single evaluation shared by concurrent observers
//! - Lazy composition and panic classification
//! - Retry with exponential backoff on a paused clock
//! - Cooperative cancellation
//! - The stream view, which drops failures
//! - Side-effecting observers and error recovery
//! - `AsyncOptional`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::StreamExt;
use futures::future::{AbortHandle, join_all};
use rstest::rstest;
use unifunc::error::{
    CancellationError, Error, InvalidOperationError, PanicError, ResultCastError,
};
use unifunc::future::{AsyncOptional, AsyncOutcome, RetryPolicy, retry};
use unifunc::optional::Optional;
use unifunc::outcome::Outcome;

async fn explode() -> i32 {
    panic!("socket closed")
}

// =============================================================================
// Memoization
// =============================================================================

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_observers_share_one_evaluation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let report = AsyncOutcome::from_future(async move {
        counter.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        "quarterly".to_string()
    });

    let observers = (0..8).map(|_| {
        let observer = report.clone();
        tokio::spawn(async move { observer.resolve().await })
    });
    let results = join_all(observers).await;

    for result in results {
        assert_eq!(result.unwrap(), Ok(Outcome::ok("quarterly".to_string())));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn every_observation_replays_the_same_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let outcome = AsyncOutcome::<i32>::from_outcome_future(async move {
        counter.fetch_add(1, Ordering::SeqCst);
        Outcome::fail(Error::new("quota exhausted"))
    });

    let first = outcome.fold(|_| String::new(), |error| error.message()).await;
    let second = outcome.if_error_with(|_| -1).await;

    assert_eq!(first, Ok("quota exhausted".to_string()));
    assert_eq!(second, Ok(-1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Composition and classification
// =============================================================================

#[rstest]
#[tokio::test]
async fn chain_runs_only_when_observed() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let chained = AsyncOutcome::ok(2)
        .map(|value| value * 3)
        .bind(move |value| {
            counter.fetch_add(1, Ordering::SeqCst);
            AsyncOutcome::ok(value + 1)
        });

    tokio::task::yield_now().await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(chained.resolve().await, Ok(Outcome::ok(7)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn panic_in_wrapped_future_is_an_exception_failure() {
    let outcome = AsyncOutcome::from_future(explode()).resolve().await.unwrap();

    let panic = outcome.error().and_then(|error| error.downcast_ref::<PanicError>());
    assert_eq!(panic.map(PanicError::message), Some("socket closed"));
    assert_eq!(outcome.error().map(Error::is_exception), Some(true));
}

#[rstest]
#[tokio::test]
async fn fallible_futures_are_classified() {
    let refused = AsyncOutcome::<i32>::from_fallible(async {
        Err(std::io::Error::other("connection refused"))
    });
    let outcome = refused.resolve().await.unwrap();
    assert!(outcome.is_exception::<std::io::Error>());

    let carried = AsyncOutcome::<i32>::from_fallible(async {
        Err(ResultCastError::new(Error::new("upstream")))
    });
    assert_eq!(carried.resolve().await, Ok(Outcome::fail(Error::new("upstream"))));
}

#[rstest]
#[tokio::test]
async fn uninitialized_handle_is_a_usage_error() {
    let unset = AsyncOutcome::<i32>::default();
    assert_eq!(
        unset.for_ok(|_| ()).await,
        Err(InvalidOperationError::UninitializedAsyncOutcome)
    );
}

// =============================================================================
// Retry
// =============================================================================

#[rstest]
#[tokio::test(start_paused = true)]
async fn retry_backs_off_until_success() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let started = tokio::time::Instant::now();

    let fetched = retry(
        move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt < 3 {
                AsyncOutcome::fail(Error::new(format!("attempt {attempt} timed out")))
            } else {
                AsyncOutcome::ok(attempt)
            }
        },
        RetryPolicy::new(5, Duration::from_millis(100)),
    );

    assert_eq!(fetched.resolve().await, Ok(Outcome::ok(3)));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(started.elapsed() >= Duration::from_millis(250));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn exhausted_retry_returns_last_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let fetched = retry(
        move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
            AsyncOutcome::<u8>::fail(Error::new(format!("attempt {attempt}")))
        },
        RetryPolicy::default(),
    );

    assert_eq!(fetched.resolve().await, Ok(Outcome::fail(Error::new("attempt 4"))));
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

// =============================================================================
// Cancellation
// =============================================================================

#[rstest]
#[tokio::test(start_paused = true)]
async fn abort_interrupts_pending_computation() {
    let (handle, registration) = AbortHandle::new_pair();
    let download = AsyncOutcome::from_future(async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        vec![0_u8; 4]
    })
    .cancellable(registration);

    let observer = download.clone();
    let waiting = tokio::spawn(async move { observer.resolve().await });

    tokio::time::sleep(Duration::from_secs(1)).await;
    handle.abort();

    let outcome = waiting.await.unwrap().unwrap();
    assert!(outcome.is_error::<CancellationError>());
    assert_eq!(outcome.error().map(Error::message), Some("Operation was cancelled".to_string()));
}

#[rstest]
#[tokio::test]
async fn abort_after_completion_keeps_result() {
    let (handle, registration) = AbortHandle::new_pair();
    let outcome = AsyncOutcome::ok(9).cancellable(registration);

    assert_eq!(outcome.resolve().await, Ok(Outcome::ok(9)));
    handle.abort();
    assert_eq!(outcome.resolve().await, Ok(Outcome::ok(9)));
}

// =============================================================================
// Stream view
// =============================================================================

#[rstest]
#[tokio::test]
async fn stream_drops_failure_that_fold_reports() {
    let failed = AsyncOutcome::<i32>::fail(Error::new("gone"));

    let streamed: Vec<i32> = failed.clone().into_stream().collect().await;
    assert!(streamed.is_empty());

    let folded = failed.fold(|_| "ok".to_string(), |error| error.message()).await;
    assert_eq!(folded, Ok("gone".to_string()));
}

// =============================================================================
// Side effects
// =============================================================================

#[rstest]
#[tokio::test]
async fn for_ok_runs_only_on_success() {
    let seen = Mutex::new(Vec::new());

    AsyncOutcome::ok(5).for_ok(|value| seen.lock().unwrap().push(value)).await.unwrap();
    AsyncOutcome::<i32>::fail(Error::new("x"))
        .for_ok(|value| seen.lock().unwrap().push(value))
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![5]);
}

#[rstest]
#[case(AsyncOutcome::ok(1), "ok 1")]
#[case(AsyncOutcome::fail(Error::new("lost")), "error lost")]
#[tokio::test]
async fn bi_for_each_runs_exactly_one_branch(
    #[case] outcome: AsyncOutcome<i32>,
    #[case] expected: &str,
) {
    let log = Mutex::new(Vec::new());
    outcome
        .bi_for_each(
            |value| log.lock().unwrap().push(format!("ok {value}")),
            |error| log.lock().unwrap().push(format!("error {error}")),
        )
        .await
        .unwrap();

    assert_eq!(*log.lock().unwrap(), vec![expected.to_string()]);
}

#[rstest]
#[tokio::test]
async fn source_runs_once_across_side_effect_and_fold() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let balance = AsyncOutcome::from_future(async move {
        counter.fetch_add(1, Ordering::SeqCst);
        120_usize
    });

    let observed = AtomicUsize::new(0);
    balance
        .for_ok(|value| observed.store(value, Ordering::SeqCst))
        .await
        .unwrap();
    let doubled = balance.fold(|value| value * 2, |_| 0).await;

    assert_eq!(observed.load(Ordering::SeqCst), 120);
    assert_eq!(doubled, Ok(240));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn map_error_rewrites_failure_and_keeps_success() {
    let annotate = |error: Error| Error::new(format!("billing: {error}"));

    let failed = AsyncOutcome::<i32>::fail(Error::new("card declined")).map_error(annotate);
    assert_eq!(
        failed.resolve().await,
        Ok(Outcome::fail(Error::new("billing: card declined")))
    );

    let succeeded = AsyncOutcome::ok(3).map_error(annotate);
    assert_eq!(succeeded.resolve().await, Ok(Outcome::ok(3)));
}

// =============================================================================
// Recovery
// =============================================================================

#[rstest]
#[tokio::test]
async fn or_else_recovers_from_failure_with_its_error() {
    let recovered = AsyncOutcome::<String>::fail(Error::new("primary down"))
        .or_else(|error| AsyncOutcome::ok(format!("replica after {error}")));

    assert_eq!(
        recovered.resolve().await,
        Ok(Outcome::ok("replica after primary down".to_string()))
    );
}

#[rstest]
#[tokio::test]
async fn or_else_leaves_success_untouched() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let primary = AsyncOutcome::ok(1).or_else(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        AsyncOutcome::ok(2)
    });

    assert_eq!(primary.resolve().await, Ok(Outcome::ok(1)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test]
async fn or_else_failing_fallback_reports_its_own_error() {
    let both_down = AsyncOutcome::<u8>::fail(Error::new("primary"))
        .or_else(|_| AsyncOutcome::fail(Error::new("replica")));

    assert_eq!(both_down.resolve().await, Ok(Outcome::fail(Error::new("replica"))));
}

// =============================================================================
// AsyncOptional
// =============================================================================

#[rstest]
#[tokio::test]
async fn async_optional_map_and_bind() {
    let profile = AsyncOptional::from_future(async {
        tokio::task::yield_now().await;
        Optional::Some(41)
    })
    .map(|id| id + 1)
    .bind(|id| if id == 42 { AsyncOptional::some("ada") } else { AsyncOptional::none() });

    assert!(profile.is_some().await);
    assert_eq!(profile.resolve().await, Optional::Some("ada"));
}

#[rstest]
#[tokio::test]
async fn async_optional_default_is_none() {
    let absent: AsyncOptional<String> = AsyncOptional::default();
    assert!(absent.is_none().await);
    assert_eq!(absent.resolve().await, Optional::None);
}

#[rstest]
#[tokio::test]
async fn outcome_and_optional_convert_both_ways() {
    let failed = AsyncOutcome::<i32>::fail(Error::new("x")).to_async_optional();
    assert!(failed.is_none().await);

    let unset = AsyncOutcome::<i32>::default().to_async_optional();
    assert!(unset.is_none().await);

    let found = AsyncOutcome::ok(7).to_async_optional();
    assert_eq!(found.resolve().await, Optional::Some(7));

    let promoted = AsyncOptional::<i32>::none().to_async_outcome(Error::new("not cached"));
    assert_eq!(promoted.resolve().await, Ok(Outcome::fail(Error::new("not cached"))));
}
