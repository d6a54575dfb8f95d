use super::employee::{Employee, EmployeeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Message published when an update changes an employee's monthly allowance.
///
/// Serializes to a JSON object with exactly six fields; allowance amounts are
/// written as JSON numbers without going through floating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceChangeEvent {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub current_monthly_allowance: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub new_monthly_allowance: Decimal,
    pub email: String,
}

impl AllowanceChangeEvent {
    /// Builds the event from the already-updated record.
    pub fn new(employee: &Employee, current_monthly_allowance: Decimal, new_monthly_allowance: Decimal) -> Self {
        Self {
            id: employee.id(),
            first_name: employee.first_name().to_string(),
            last_name: employee.last_name().to_string(),
            current_monthly_allowance,
            new_monthly_allowance,
            email: employee.email().to_string(),
        }
    }
}
