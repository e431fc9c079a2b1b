use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::WorkflowError;

/// Key under which the index of the last executed step is recorded
pub const SEQUENCE_ID_KEY: &str = "__SEQUENCE_ID";
/// Key under which the name of the last executed step is recorded
pub const PRIOR_STEP_KEY: &str = "__PRIOR_STEP";

/// Key/value snapshot of a workflow's state, in insertion order.
///
/// Snapshots are values: `update` returns a new snapshot and leaves the
/// receiver untouched, so a snapshot handed to a caller never changes under
/// them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowState {
    values: Map<String, Value>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this snapshot with `key` set to `value`
    pub fn update(&self, key: &str, value: impl Into<Value>) -> Self {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value.into());
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Look up an integer field
    pub fn get_i64(&self, key: &str) -> Result<i64, WorkflowError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| WorkflowError::MissingKey(key.to_string()))?;

        value.as_i64().ok_or_else(|| WorkflowError::NotAnInteger {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Keys in the order they were first written
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// JSON object form of the snapshot, as returned to HTTP clients
    pub fn serialize(&self) -> Value {
        Value::Object(self.values.clone())
    }
}
