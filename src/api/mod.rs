//! HTTP API module for the employee directory.
//!
//! This module provides the REST endpoints for employees, reporting
//! structures and compensation.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
