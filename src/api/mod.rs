// HTTP endpoint layer: health check and the counter run route

pub mod dependencies;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use dependencies::AppDependencies;
pub use dto::{CounterInput, HealthResponse, RunResponse};
pub use error::ApiError;
pub use handlers::execute_run;
pub use routes::create_router;
