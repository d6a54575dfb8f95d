//! HTTP surface of the service: routing, request/response shapes and status
//! mapping. No business rules live here.

pub mod dto;
pub mod error;
pub mod handlers;

use crate::application::service::EmployeeService;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EmployeeService>,
}

impl AppState {
    pub fn new(service: EmployeeService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Builds the application router with all endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/employee",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route(
            "/api/v1/employee/{id}",
            get(handlers::get_employee)
                .put(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
