// Workflow modules
// The counting machine plus the traits the HTTP layer drives it through

pub mod application;
pub mod counter;
pub mod state;

pub use application::{Action, Application, ApplicationBuilder, RunOutput, StepResult, WorkflowError};
pub use counter::{CounterApplication, CounterApplicationBuilder, CounterMachine, RESULT_STEP};
pub use state::WorkflowState;

#[cfg(any(test, feature = "testing"))]
pub use application::MockApplicationBuilder;
