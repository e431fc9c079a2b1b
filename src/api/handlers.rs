use axum::extract::rejection::JsonRejection;
use axum::extract::{MatchedPath, State};
use axum::Json;
use tokio::task::JoinError;
use tracing::{error, info, warn, Instrument};

use super::dependencies::AppDependencies;
use super::dto::{CounterInput, HealthResponse, RunResponse, SUCCESS_MESSAGE};
use super::error::ApiError;
use crate::observability::{create_workflow_span, run_metrics};
use crate::telemetry::{create_request_span, generate_correlation_id};
use crate::time_operation;
use crate::workflows::counter::{COUNTER_KEY, COUNTER_LIMIT_KEY};
use crate::workflows::{ApplicationBuilder, RESULT_STEP};

/// GET / - health check
pub async fn health_check(State(dependencies): State<AppDependencies>) -> Json<HealthResponse> {
    Json(HealthResponse::running(dependencies.title()))
}

/// POST /run - count up to `number` and return the final workflow state
pub async fn run_counter(
    State(dependencies): State<AppDependencies>,
    path: MatchedPath,
    payload: Result<Json<CounterInput>, JsonRejection>,
) -> Result<Json<RunResponse>, ApiError> {
    let correlation_id = generate_correlation_id();
    let span = create_request_span(path.as_str(), &correlation_id);

    async move {
        let Json(input) = payload.map_err(|rejection| {
            warn!(status = %rejection.status(), "Rejected malformed request body");
            ApiError::from(rejection)
        })?;

        execute_run(&dependencies, input, &correlation_id)
            .await
            .map(Json)
    }
    .instrument(span)
    .await
}

/// Validate the input and drive one workflow to its `result` step.
///
/// Shared by the HTTP handler and the `run` CLI command.
pub async fn execute_run(
    dependencies: &AppDependencies,
    input: CounterInput,
    correlation_id: &str,
) -> Result<RunResponse, ApiError> {
    let metrics = run_metrics();

    if input.number <= 0 {
        metrics.record_validation_rejection();
        warn!(number = input.number, "Rejected non-positive count limit");
        return Err(ApiError::invalid_number());
    }

    metrics.record_run_started();
    info!(number = input.number, "Starting counter workflow");

    let builder = dependencies.builder();
    let span = create_workflow_span("counter", correlation_id);
    let timer = time_operation!("counter_workflow");

    let outcome = tokio::task::spawn_blocking(move || {
        span.in_scope(|| run_to_result(builder.as_ref(), input.number))
    })
    .await
    .unwrap_or_else(|join_error| Err(ApiError::Execution(describe_join_error(join_error))));

    timer.finish();

    match &outcome {
        Ok(response) => {
            metrics.record_run_succeeded();
            info!(
                final_counter_value = response.final_counter_value,
                limit = response.limit,
                "Counter workflow succeeded"
            );
        }
        Err(e) => {
            metrics.record_run_failed();
            error!("Burr execution failed: {}", e);
        }
    }

    outcome
}

fn run_to_result(builder: &dyn ApplicationBuilder, number: i64) -> Result<RunResponse, ApiError> {
    let mut application = builder.build(number)?;
    let (_, _, final_state) = application.run(&[RESULT_STEP])?;

    Ok(RunResponse {
        final_counter_value: final_state.get_i64(COUNTER_KEY)?,
        limit: final_state.get_i64(COUNTER_LIMIT_KEY)?,
        burr_state: final_state.serialize(),
        message: SUCCESS_MESSAGE.to_string(),
    })
}

fn describe_join_error(join_error: JoinError) -> String {
    if !join_error.is_panic() {
        return join_error.to_string();
    }

    let payload = join_error.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "workflow panicked".to_string()
    }
}
