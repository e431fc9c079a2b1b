use serde_json::{json, Value};
use statig::prelude::*;
use tracing::{debug, info};

use super::application::{
    Action, Application, ApplicationBuilder, RunOutput, StepResult, WorkflowError,
};
use super::state::{WorkflowState, PRIOR_STEP_KEY, SEQUENCE_ID_KEY};

pub const COUNTER_STEP: &str = "counter";
pub const RESULT_STEP: &str = "result";
pub const STEPS: [&str; 2] = [COUNTER_STEP, RESULT_STEP];

pub const COUNTER_KEY: &str = "counter";
pub const COUNTER_LIMIT_KEY: &str = "counter_limit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    Execute,
}

/// Context of the "count up to N" machine.
///
/// `counter` is the entry step and repeats while `counter < counter_limit`;
/// `result` runs once afterwards and has no outgoing transitions.
#[derive(Debug, Default)]
pub struct CounterMachine {
    counter: i64,
    counter_limit: i64,
    sequence_id: Option<u64>,
    prior_step: Option<&'static str>,
    last_result: StepResult,
    finished: bool,
}

impl CounterMachine {
    pub fn new(counter_limit: i64) -> Self {
        Self {
            counter_limit,
            ..Default::default()
        }
    }

    fn record_step(&mut self, step: &'static str, result: Value) {
        self.sequence_id = Some(self.sequence_id.map_or(0, |id| id + 1));
        self.prior_step = Some(step);
        self.last_result = match result {
            Value::Object(map) => map,
            _ => StepResult::new(),
        };
    }

    pub fn count(&self) -> i64 {
        self.counter
    }

    pub fn counter_limit(&self) -> i64 {
        self.counter_limit
    }

    pub fn prior_step(&self) -> Option<&'static str> {
        self.prior_step
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn snapshot(&self) -> WorkflowState {
        let mut state = WorkflowState::new()
            .update(COUNTER_KEY, self.counter)
            .update(COUNTER_LIMIT_KEY, self.counter_limit);

        if let Some(sequence_id) = self.sequence_id {
            state = state.update(SEQUENCE_ID_KEY, sequence_id);
        }
        if let Some(step) = self.prior_step {
            state = state.update(PRIOR_STEP_KEY, step);
        }
        state
    }
}

#[state_machine(initial = "State::counter()")]
impl CounterMachine {
    #[state]
    fn counter(&mut self, event: &StepEvent) -> Outcome<State> {
        match event {
            StepEvent::Execute => {
                self.counter += 1;
                self.record_step(COUNTER_STEP, json!({ COUNTER_KEY: self.counter }));
                debug!(
                    counter = self.counter,
                    counter_limit = self.counter_limit,
                    "Counter step executed"
                );

                if self.counter < self.counter_limit {
                    Handled
                } else {
                    Transition(State::result())
                }
            }
        }
    }

    #[state]
    fn result(&mut self, event: &StepEvent) -> Outcome<State> {
        match event {
            StepEvent::Execute => {
                if !self.finished {
                    self.record_step(RESULT_STEP, json!({ COUNTER_KEY: self.counter }));
                    self.finished = true;
                    debug!(counter = self.counter, "Result step executed");
                }
                Handled
            }
        }
    }
}

fn describe_step(step: &str) -> Action {
    match step {
        COUNTER_STEP => Action::new(COUNTER_STEP, &[COUNTER_KEY, COUNTER_LIMIT_KEY], &[COUNTER_KEY]),
        _ => Action::new(RESULT_STEP, &[COUNTER_KEY], &[]),
    }
}

/// A single counting run, owned by one request
pub struct CounterApplication {
    machine: StateMachine<CounterMachine>,
}

impl CounterApplication {
    pub fn new(count_up_to: i64) -> Result<Self, WorkflowError> {
        if count_up_to <= 0 {
            return Err(WorkflowError::InvalidLimit(count_up_to));
        }

        Ok(Self {
            machine: CounterMachine::new(count_up_to).state_machine(),
        })
    }

    pub fn context(&self) -> &CounterMachine {
        self.machine.inner()
    }

    pub fn state(&self) -> WorkflowState {
        self.machine.inner().snapshot()
    }
}

impl Application for CounterApplication {
    fn run(&mut self, halt_after: &[&str]) -> Result<RunOutput, WorkflowError> {
        if let Some(unknown) = halt_after.iter().find(|step| !STEPS.contains(*step)) {
            return Err(WorkflowError::UnknownStep(unknown.to_string()));
        }
        if self.machine.inner().is_finished() {
            return Err(WorkflowError::AlreadyFinished);
        }

        info!(
            counter_limit = self.machine.inner().counter_limit(),
            halt_after = ?halt_after,
            "Running counter workflow"
        );

        loop {
            self.machine.handle(&StepEvent::Execute);

            let context = self.machine.inner();
            let halted = context
                .prior_step()
                .is_some_and(|step| halt_after.contains(&step));
            if halted || context.is_finished() {
                break;
            }
        }

        let context = self.machine.inner();
        let step = context.prior_step().ok_or(WorkflowError::NoStepExecuted)?;

        info!(
            counter = context.count(),
            counter_limit = context.counter_limit(),
            step = step,
            "Counter workflow halted"
        );

        Ok((describe_step(step), context.last_result.clone(), context.snapshot()))
    }
}

/// Builds `CounterApplication`s for the HTTP layer
#[derive(Debug, Default, Clone, Copy)]
pub struct CounterApplicationBuilder;

impl ApplicationBuilder for CounterApplicationBuilder {
    fn build(&self, count_up_to: i64) -> Result<Box<dyn Application>, WorkflowError> {
        Ok(Box::new(CounterApplication::new(count_up_to)?))
    }
}
