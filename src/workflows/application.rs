// Contract between the HTTP layer and a runnable workflow.
// The endpoint only ever sees these traits, so tests can swap in fakes.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::state::WorkflowState;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("count limit must be a positive integer, got {0}")]
    InvalidLimit(i64),
    #[error("unknown step '{0}'")]
    UnknownStep(String),
    #[error("workflow has already finished")]
    AlreadyFinished,
    #[error("workflow halted before executing any step")]
    NoStepExecuted,
    #[error("state key '{0}' not found")]
    MissingKey(String),
    #[error("state key '{key}' is not an integer: {value}")]
    NotAnInteger { key: String, value: String },
    #[error("step '{step}' failed: {reason}")]
    StepFailed { step: String, reason: String },
}

/// Descriptor of an executed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub name: String,
    pub reads: Vec<String>,
    pub writes: Vec<String>,
}

impl Action {
    pub fn new(name: &str, reads: &[&str], writes: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            reads: reads.iter().map(|s| s.to_string()).collect(),
            writes: writes.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// What a single step returned, separate from the state it wrote
pub type StepResult = Map<String, Value>;

/// Outcome of `Application::run`: last action, its result, final state
pub type RunOutput = (Action, StepResult, WorkflowState);

/// A constructed workflow instance, driven once to a halting step
pub trait Application: Send {
    /// Execute steps until one named in `halt_after` has run, or the
    /// workflow has nothing left to do.
    fn run(&mut self, halt_after: &[&str]) -> Result<RunOutput, WorkflowError>;
}

/// Builds a fresh workflow for a given upper bound
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ApplicationBuilder: Send + Sync {
    fn build(&self, count_up_to: i64) -> Result<Box<dyn Application>, WorkflowError>;
}
