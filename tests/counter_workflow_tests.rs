//! Integration tests for the counting workflow through its public contract
//!
//! The HTTP layer only sees `ApplicationBuilder` and `Application`, so these
//! tests stay on that surface too.

use burr_counter::workflows::counter::{COUNTER_KEY, COUNTER_LIMIT_KEY};
use burr_counter::workflows::state::{PRIOR_STEP_KEY, SEQUENCE_ID_KEY};
use burr_counter::workflows::RESULT_STEP;
use burr_counter::{ApplicationBuilder, CounterApplicationBuilder, WorkflowError};
use serde_json::json;

#[test]
fn test_counter_equals_limit_at_halt() {
    let builder = CounterApplicationBuilder;

    for n in 1..=50_i64 {
        let mut application = builder.build(n).unwrap();
        let (action, result, state) = application.run(&[RESULT_STEP]).unwrap();

        assert_eq!(action.name, RESULT_STEP);
        assert_eq!(result.get(COUNTER_KEY), Some(&json!(n)));
        assert_eq!(state.get_i64(COUNTER_KEY).unwrap(), n);
        assert_eq!(state.get_i64(COUNTER_LIMIT_KEY).unwrap(), n);
    }
}

#[test]
fn test_final_snapshot_shape() {
    let mut application = CounterApplicationBuilder.build(3).unwrap();

    let (_, _, state) = application.run(&[RESULT_STEP]).unwrap();

    assert_eq!(
        state.serialize(),
        json!({
            "counter": 3,
            "counter_limit": 3,
            "__SEQUENCE_ID": 3,
            "__PRIOR_STEP": "result",
        })
    );
    assert!(state.contains_key(SEQUENCE_ID_KEY));
    assert!(state.contains_key(PRIOR_STEP_KEY));
}

#[test]
fn test_builder_rejects_non_positive_limits() {
    let builder = CounterApplicationBuilder;

    assert!(matches!(builder.build(0), Err(WorkflowError::InvalidLimit(0))));
    assert!(matches!(builder.build(-5), Err(WorkflowError::InvalidLimit(-5))));
}

#[test]
fn test_large_limit_completes() {
    let mut application = CounterApplicationBuilder.build(100_000).unwrap();

    let (_, _, state) = application.run(&[RESULT_STEP]).unwrap();

    assert_eq!(state.get_i64(COUNTER_KEY).unwrap(), 100_000);
}

#[test]
fn test_runs_on_the_tokio_blocking_pool() {
    let state = tokio_test::block_on(async {
        tokio::task::spawn_blocking(|| {
            let mut application = CounterApplicationBuilder.build(8)?;
            application.run(&[RESULT_STEP]).map(|(_, _, state)| state)
        })
        .await
    });

    let state = state.unwrap().unwrap();
    assert_eq!(state.get_i64(COUNTER_KEY).unwrap(), 8);
}
