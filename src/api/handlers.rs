//! HTTP request handlers for the directory API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::DirectoryError;
use crate::models::{CompensationRequest, EmployeeUpdate, NewEmployee};

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/employee", post(create_employee))
        .route("/api/employee/:id", get(get_employee).put(replace_employee))
        .route(
            "/api/employee/:id/reportingStructure",
            get(get_reporting_structure),
        )
        .route("/api/compensation", post(create_compensation))
        .route("/api/compensation/:id", get(get_compensation))
        .with_state(state)
}

/// Handler for POST /api/employee.
async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let new = match payload {
        Ok(Json(new)) => new,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    debug!(
        correlation_id = %correlation_id,
        name = %format!("{} {}", new.first_name, new.last_name),
        "Received employee create request"
    );

    match state.employee_manager().create(new) {
        Ok(employee) => created(format!("/api/employee/{}", employee.id), employee),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /api/employee/:id.
async fn get_employee(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    debug!(correlation_id = %correlation_id, employee_id = %id, "Received employee get request");

    match state.employee_manager().get(&id) {
        Ok(Some(employee)) => (StatusCode::OK, Json(employee)).into_response(),
        Ok(None) => not_found("employee", &id),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /api/employee/:id.
async fn replace_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    debug!(correlation_id = %correlation_id, employee_id = %id, "Received employee update request");

    match state.employee_manager().replace(&id, update) {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /api/employee/:id/reportingStructure.
async fn get_reporting_structure(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    debug!(
        correlation_id = %correlation_id,
        employee_id = %id,
        "Received reporting structure get request"
    );

    match state.reporting_calculator().compute(&id) {
        Ok(Some(structure)) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %id,
                number_of_reports = structure.number_of_reports,
                "Reporting structure computed"
            );
            (StatusCode::OK, Json(structure)).into_response()
        }
        Ok(None) => not_found("reporting structure", &id),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /api/compensation.
///
/// Creates the employee's current compensation, replacing any existing one.
async fn create_compensation(
    State(state): State<AppState>,
    payload: Result<Json<CompensationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    debug!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Received compensation create request"
    );

    match state.compensation_manager().create(request) {
        Ok(compensation) => created(
            format!("/api/compensation/{}", compensation.employee_id),
            compensation,
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /api/compensation/:id, keyed by employee id.
async fn get_compensation(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    debug!(correlation_id = %correlation_id, employee_id = %id, "Received compensation get request");

    match state.compensation_manager().get_by_employee_id(&id) {
        Ok(Some(compensation)) => (StatusCode::OK, Json(compensation)).into_response(),
        Ok(None) => not_found("compensation", &id),
        Err(err) => error_response(correlation_id, err),
    }
}

fn created<T: Serialize>(location: String, body: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}

fn not_found(resource: &str, id: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(ApiError::not_found(resource, id))).into_response()
}

fn error_response(correlation_id: Uuid, err: DirectoryError) -> Response {
    match &err {
        DirectoryError::Validation { .. } | DirectoryError::EmployeeNotFound { .. } => {
            warn!(correlation_id = %correlation_id, error = %err, "Request rejected");
        }
        _ => {
            error!(correlation_id = %correlation_id, error = %err, "Request failed");
        }
    }
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}
