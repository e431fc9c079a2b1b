//! Route configuration.
//!
//! | Method | Path   | Handler        |
//! |--------|--------|----------------|
//! | GET    | /      | `health_check` |
//! | POST   | /      | `run_counter`  |
//! | POST   | /run   | `run_counter`  |
//!
//! `POST /` is kept alongside `/run` for hosts that mount the function at a
//! fixed path and only forward the root.

use axum::routing::{get, post};
use axum::Router;

use super::dependencies::AppDependencies;
use super::handlers::{health_check, run_counter};

pub fn create_router(dependencies: AppDependencies) -> Router {
    Router::new()
        .route("/", get(health_check).post(run_counter))
        .route("/run", post(run_counter))
        .with_state(dependencies)
}
