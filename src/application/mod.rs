//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `EmployeeService`, which runs the salary-update
//! workflow on top of the store and notifier ports.

pub mod service;
