#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use employee_payroll::application::service::EmployeeService;
use employee_payroll::infrastructure::in_memory::{InMemoryEmployeeStore, InMemoryNotifier};
use employee_payroll::interfaces::http::{AppState, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Router over fresh in-memory adapters, plus a handle on the recorded notifications.
pub fn test_app() -> (Router, InMemoryNotifier) {
    let notifier = InMemoryNotifier::new();
    let service = EmployeeService::new(
        Box::new(InMemoryEmployeeStore::new()),
        Box::new(notifier.clone()),
    );
    (build_router(AppState::new(service)), notifier)
}

pub fn employee_body(suffix: &str, annual_salary: u64, percentage: u64) -> Value {
    json!({
        "firstName": format!("David{}", suffix),
        "lastName": format!("Kilan{}", suffix),
        "email": format!("david.kilan{}@example.com", suffix),
        "payrollId": format!("PAY123{}", suffix),
        "annualSalary": annual_salary,
        "salaryAllowancePercentage": percentage,
    })
}

/// Sends one request through the router and returns the status and raw body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&Value>) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(body) => Body::from(serde_json::to_vec(body).unwrap()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

/// Creates `count` distinct employees and returns their ids.
pub async fn seed_employees(app: &Router, count: usize) -> Vec<u64> {
    let mut ids = Vec::with_capacity(count);
    for i in 1..=count {
        let (status, body) = send(app, "POST", "/api/v1/employee", Some(&employee_body(&i.to_string(), 12000, 30))).await;
        assert_eq!(status, StatusCode::CREATED);
        let value: Value = serde_json::from_slice(&body).unwrap();
        ids.push(value["id"].as_u64().unwrap());
    }
    ids
}
