use crate::domain::allowance::MAX_ANNUAL_SALARY;
use crate::domain::employee::{Employee, EmployeeDetails, EmployeeId};
use crate::domain::ports::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};
use crate::error::{PayrollError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/employee` and `PUT /api/v1/employee/{id}`.
///
/// Unknown fields (for example an `id` echoed back by the client) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub payroll_id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub annual_salary: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub salary_allowance_percentage: Decimal,
}

impl EmployeeRequest {
    /// Checks the request and turns it into domain values.
    pub fn validate(self) -> Result<EmployeeDetails> {
        if self.email.trim().is_empty() {
            return Err(invalid("email must not be blank"));
        }
        if !self.email.contains('@') {
            return Err(invalid("email must contain '@'"));
        }
        if self.payroll_id.trim().is_empty() {
            return Err(invalid("payrollId must not be blank"));
        }
        if self.annual_salary < Decimal::ZERO {
            return Err(invalid("annualSalary must not be negative"));
        }
        if self.annual_salary > MAX_ANNUAL_SALARY {
            return Err(PayrollError::ValidationError(format!(
                "annualSalary must not exceed {}",
                MAX_ANNUAL_SALARY
            )));
        }
        if self.salary_allowance_percentage < Decimal::ZERO
            || self.salary_allowance_percentage > Decimal::ONE_HUNDRED
        {
            return Err(invalid("salaryAllowancePercentage must be between 0 and 100"));
        }

        Ok(EmployeeDetails {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            payroll_id: self.payroll_id,
            annual_salary: self.annual_salary,
            salary_allowance_percentage: self.salary_allowance_percentage,
        })
    }
}

fn invalid(message: &str) -> PayrollError {
    PayrollError::ValidationError(message.to_string())
}

/// Employee representation returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub payroll_id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub annual_salary: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub salary_allowance_percentage: Decimal,
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id(),
            first_name: employee.first_name().to_string(),
            last_name: employee.last_name().to_string(),
            email: employee.email().to_string(),
            payroll_id: employee.payroll_id().to_string(),
            annual_salary: employee.annual_salary(),
            salary_allowance_percentage: employee.salary_allowance_percentage(),
        }
    }
}

/// Query parameters of `GET /api/v1/employee`.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl PageParams {
    pub fn into_page_request(self) -> Result<PageRequest> {
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(PayrollError::ValidationError(format!(
                "size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(PageRequest::new(self.page.unwrap_or(0), size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> EmployeeRequest {
        EmployeeRequest {
            first_name: "David".to_string(),
            last_name: "Kilan".to_string(),
            email: "david.kilan@example.com".to_string(),
            payroll_id: "PAY123".to_string(),
            annual_salary: dec!(12000),
            salary_allowance_percentage: dec!(30),
        }
    }

    #[test]
    fn test_valid_request_maps_to_details() {
        let details = request().validate().unwrap();
        assert_eq!(details.payroll_id, "PAY123");
        assert_eq!(details.annual_salary, dec!(12000));
    }

    #[test]
    fn test_request_validation_rules() {
        let mut negative_salary = request();
        negative_salary.annual_salary = dec!(-1);
        assert!(matches!(negative_salary.validate(), Err(PayrollError::ValidationError(_))));

        let mut too_large = request();
        too_large.salary_allowance_percentage = dec!(100.01);
        assert!(matches!(too_large.validate(), Err(PayrollError::ValidationError(_))));

        let mut blank_email = request();
        blank_email.email = "  ".to_string();
        assert!(matches!(blank_email.validate(), Err(PayrollError::ValidationError(_))));

        let mut blank_payroll = request();
        blank_payroll.payroll_id = String::new();
        assert!(matches!(blank_payroll.validate(), Err(PayrollError::ValidationError(_))));

        let mut bounds = request();
        bounds.annual_salary = dec!(0);
        bounds.salary_allowance_percentage = dec!(100);
        assert!(bounds.validate().is_ok());
    }

    #[test]
    fn test_request_salary_ceiling() {
        let mut at_ceiling = request();
        at_ceiling.annual_salary = MAX_ANNUAL_SALARY;
        assert!(at_ceiling.validate().is_ok());

        let mut above_ceiling = request();
        above_ceiling.annual_salary = dec!(1000000000000000.01);
        assert!(matches!(above_ceiling.validate(), Err(PayrollError::ValidationError(_))));

        let mut overflowing = request();
        overflowing.annual_salary = dec!(10000000000000000000000000000);
        assert!(matches!(overflowing.validate(), Err(PayrollError::ValidationError(_))));
    }

    #[test]
    fn test_request_ignores_unknown_fields_and_reads_numbers() {
        let json = r#"{"id": 5, "firstName": "David", "lastName": "Kilan",
            "email": "david.kilan@example.com", "payrollId": "PAY123",
            "annualSalary": 12000.50, "salaryAllowancePercentage": 30}"#;
        let parsed: EmployeeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.annual_salary, dec!(12000.50));
        assert_eq!(parsed.salary_allowance_percentage, dec!(30));
    }

    #[test]
    fn test_page_params_defaults_and_bounds() {
        assert_eq!(PageParams::default().into_page_request().unwrap(), PageRequest::new(0, 20));

        let params = PageParams {
            page: Some(3),
            size: Some(5),
        };
        assert_eq!(params.into_page_request().unwrap(), PageRequest::new(3, 5));

        let zero = PageParams {
            page: None,
            size: Some(0),
        };
        assert!(zero.into_page_request().is_err());

        let huge = PageParams {
            page: None,
            size: Some(MAX_PAGE_SIZE + 1),
        };
        assert!(huge.into_page_request().is_err());
    }
}
