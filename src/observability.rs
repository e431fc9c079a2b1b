use tracing::info;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Counters for workflow runs handled by this process
#[derive(Debug, Default)]
pub struct RunMetrics {
    pub runs_started: AtomicU64,
    pub runs_succeeded: AtomicU64,
    pub runs_failed: AtomicU64,
    pub validation_rejections: AtomicU64,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_run_started(&self) {
        self.runs_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_run_succeeded(&self) {
        self.runs_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_run_failed(&self) {
        self.runs_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_rejection(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> RunStats {
        RunStats {
            runs_started: self.runs_started.load(Ordering::Relaxed),
            runs_succeeded: self.runs_succeeded.load(Ordering::Relaxed),
            runs_failed: self.runs_failed.load(Ordering::Relaxed),
            validation_rejections: self.validation_rejections.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            runs_started = stats.runs_started,
            runs_succeeded = stats.runs_succeeded,
            runs_failed = stats.runs_failed,
            validation_rejections = stats.validation_rejections,
            "Workflow run metrics"
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub runs_started: u64,
    pub runs_succeeded: u64,
    pub runs_failed: u64,
    pub validation_rejections: u64,
}

/// Global metrics instance
static RUN_METRICS: std::sync::LazyLock<RunMetrics> = std::sync::LazyLock::new(RunMetrics::new);

pub fn run_metrics() -> &'static RunMetrics {
    &RUN_METRICS
}

/// Create a span around one workflow execution
pub fn create_workflow_span(workflow: &str, correlation_id: &str) -> tracing::Span {
    tracing::info_span!(
        "workflow",
        workflow.name = workflow,
        correlation.id = correlation_id,
        otel.kind = "internal"
    )
}

/// Time an operation and log its duration
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(self) {
        let duration = self.start.elapsed();
        info!(
            operation = %self.operation,
            duration_ms = duration.as_millis(),
            "Operation completed"
        );
    }
}

#[macro_export]
macro_rules! time_operation {
    ($operation:expr) => {
        $crate::observability::OperationTimer::new($operation)
    };
}
