// Burr Counter Library - HTTP wrapper around the "count up to N" workflow
// This exposes the core components for testing and integration

pub mod api;
pub mod config;
pub mod observability;
pub mod shutdown;
pub mod telemetry;
pub mod workflows;

// Re-export key types for easy access
pub use api::{create_router, execute_run, ApiError, AppDependencies, CounterInput, RunResponse};
pub use config::{config, init_config, BurrCounterConfig};
pub use observability::{create_workflow_span, run_metrics, OperationTimer, RunMetrics};
pub use shutdown::ShutdownCoordinator;
pub use telemetry::{generate_correlation_id, init_telemetry, shutdown_telemetry};
pub use workflows::{
    Application, ApplicationBuilder, CounterApplication, CounterApplicationBuilder, WorkflowError,
    WorkflowState,
};
