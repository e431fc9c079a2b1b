use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SUCCESS_MESSAGE: &str = "Execution successful.";
pub const RUNNING_STATUS: &str = "running";

/// Body of `POST /run`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CounterInput {
    /// Upper bound to count to
    pub number: i64,
}

/// Success payload of `POST /run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResponse {
    pub burr_state: Value,
    pub final_counter_value: i64,
    pub limit: i64,
    pub message: String,
}

/// Payload of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
}

impl HealthResponse {
    pub fn running(title: &str) -> Self {
        Self {
            message: format!("{title} is Ready!"),
            status: RUNNING_STATUS.to_string(),
        }
    }
}
