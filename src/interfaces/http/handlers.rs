use super::AppState;
use super::dto::{EmployeeRequest, EmployeeResponse, PageParams};
use super::error::HttpError;
use crate::domain::employee::EmployeeId;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use tracing::info;

/// Handler for GET /api/v1/employee.
pub async fn list_employees(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<EmployeeResponse>>, HttpError> {
    let Query(params) = params?;
    let page = params.into_page_request()?;
    let employees = state.service.list_employees(page).await?;
    Ok(Json(employees.iter().map(EmployeeResponse::from).collect()))
}

/// Handler for GET /api/v1/employee/{id}.
pub async fn get_employee(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    let Path(id) = id?;
    let employee = state.service.get_employee(id).await?;
    Ok(Json(EmployeeResponse::from(&employee)))
}

/// Handler for POST /api/v1/employee.
pub async fn create_employee(
    State(state): State<AppState>,
    request: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EmployeeResponse>), HttpError> {
    let Json(request) = request?;
    info!(request = ?request, "Received request to create employee");

    let details = request.validate()?;
    let employee = state.service.create_employee(details).await?;
    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(&employee))))
}

/// Handler for PUT /api/v1/employee/{id}.
///
/// Succeeds once the record is stored, whatever happens to the allowance
/// notification.
pub async fn update_employee(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
    request: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    let Path(id) = id?;
    let Json(request) = request?;
    info!(employee_id = id, request = ?request, "Received request to update employee");

    let details = request.validate()?;
    let employee = state.service.update_employee(id, details).await?;
    Ok(Json(EmployeeResponse::from(&employee)))
}

/// Handler for DELETE /api/v1/employee/{id}.
pub async fn delete_employee(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> Result<StatusCode, HttpError> {
    let Path(id) = id?;
    info!(employee_id = id, "Received request to delete employee");

    state.service.delete_employee(id).await?;
    Ok(StatusCode::OK)
}
