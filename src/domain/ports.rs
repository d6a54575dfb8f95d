use super::employee::{Employee, EmployeeId, NewEmployee};
use super::notification::AllowanceChangeEvent;
use crate::error::Result;
use async_trait::async_trait;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 2000;

/// Zero-based page selector for listing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// Number of records preceding this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// Durable storage of employee records.
///
/// Implementations enforce that `email` and `payroll_id` are unique across all
/// records and report clashes as `PayrollError::ConstraintViolation`.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Assigns a fresh identifier and persists the record.
    async fn insert(&self, employee: NewEmployee) -> Result<Employee>;
    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>>;
    /// Overwrites the whole record stored under `employee.id()`.
    async fn save(&self, employee: Employee) -> Result<()>;
    /// Removing an absent id is not an error.
    async fn delete(&self, id: EmployeeId) -> Result<()>;
    async fn list(&self, page: PageRequest) -> Result<Vec<Employee>>;
}

/// Delivery of allowance change events to the downstream consumer.
///
/// A successful return means the channel accepted the message, not that it was
/// processed.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, event: &AllowanceChangeEvent) -> Result<()>;
}

pub type EmployeeStoreBox = Box<dyn EmployeeStore>;
pub type NotifierBox = Box<dyn Notifier>;
