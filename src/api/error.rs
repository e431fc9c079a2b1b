//! Error responses for the HTTP layer.
//!
//! Every error body has the same shape, `{"detail": "<message>"}`, whatever
//! the status code.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::workflows::WorkflowError;

pub const INVALID_NUMBER_DETAIL: &str = "Number must be a positive integer.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// A well-formed request whose value is out of range
    #[error("{0}")]
    InvalidArgument(String),
    /// A body the JSON extractor could not turn into a request
    #[error("{message}")]
    MalformedRequest { status: StatusCode, message: String },
    /// Anything that went wrong while building or running the workflow
    #[error("Internal Server Error during Burr execution: {0}")]
    Execution(String),
}

impl ApiError {
    pub fn invalid_number() -> Self {
        Self::InvalidArgument(INVALID_NUMBER_DETAIL.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedRequest { status, .. } => *status,
            ApiError::Execution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        ApiError::Execution(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
