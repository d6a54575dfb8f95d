use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of an employee record.
pub type EmployeeId = u64;

/// The caller-supplied fields of an employee record.
///
/// Used both to create a record and as the full replacement values of an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub payroll_id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub annual_salary: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub salary_allowance_percentage: Decimal,
}

/// An employee that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub details: EmployeeDetails,
    pub created_at: DateTime<Utc>,
}

impl NewEmployee {
    pub fn new(details: EmployeeDetails, created_at: DateTime<Utc>) -> Self {
        Self {
            details,
            created_at,
        }
    }

    /// Binds the identifier chosen by the store. The creation instant becomes the
    /// initial salary-change date.
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        let EmployeeDetails {
            first_name,
            last_name,
            email,
            payroll_id,
            annual_salary,
            salary_allowance_percentage,
        } = self.details;
        Employee {
            id,
            first_name,
            last_name,
            email,
            payroll_id,
            annual_salary,
            salary_allowance_percentage,
            last_salary_changed_date: self.created_at,
        }
    }
}

/// A persisted employee payroll record.
///
/// Fields are read-only from outside the domain; the only mutation path is
/// [`Employee::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    id: EmployeeId,
    first_name: String,
    last_name: String,
    email: String,
    payroll_id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    annual_salary: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    salary_allowance_percentage: Decimal,
    last_salary_changed_date: DateTime<Utc>,
}

impl Employee {
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn payroll_id(&self) -> &str {
        &self.payroll_id
    }

    pub fn annual_salary(&self) -> Decimal {
        self.annual_salary
    }

    pub fn salary_allowance_percentage(&self) -> Decimal {
        self.salary_allowance_percentage
    }

    pub fn last_salary_changed_date(&self) -> DateTime<Utc> {
        self.last_salary_changed_date
    }

    pub fn details(&self) -> EmployeeDetails {
        EmployeeDetails {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            payroll_id: self.payroll_id.clone(),
            annual_salary: self.annual_salary,
            salary_allowance_percentage: self.salary_allowance_percentage,
        }
    }

    /// Replaces every caller-supplied field with `update`.
    ///
    /// The salary-change date moves to `now` only when the annual salary differs
    /// in value; changes to any other field leave it alone. Returns whether the
    /// salary changed.
    pub fn apply(&mut self, update: EmployeeDetails, now: DateTime<Utc>) -> bool {
        let salary_changed = update.annual_salary != self.annual_salary;
        if salary_changed {
            self.annual_salary = update.annual_salary;
            self.last_salary_changed_date = now;
        }

        self.first_name = update.first_name;
        self.last_name = update.last_name;
        self.payroll_id = update.payroll_id;
        self.salary_allowance_percentage = update.salary_allowance_percentage;
        self.email = update.email;
        salary_changed
    }
}
