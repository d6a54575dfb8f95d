use crate::domain::employee::{Employee, EmployeeId, NewEmployee};
use crate::domain::notification::AllowanceChangeEvent;
use crate::domain::ports::{EmployeeStore, Notifier, PageRequest};
use crate::error::{PayrollError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Records {
    last_id: EmployeeId,
    employees: BTreeMap<EmployeeId, Employee>,
}

impl Records {
    /// Rejects `email`/`payroll_id` values already held by a record other than `own_id`.
    fn check_unique(&self, own_id: Option<EmployeeId>, email: &str, payroll_id: &str) -> Result<()> {
        for other in self.employees.values() {
            if Some(other.id()) == own_id {
                continue;
            }
            if other.email() == email {
                return Err(PayrollError::ConstraintViolation(format!(
                    "email '{}' is already in use",
                    email
                )));
            }
            if other.payroll_id() == payroll_id {
                return Err(PayrollError::ConstraintViolation(format!(
                    "payroll id '{}' is already in use",
                    payroll_id
                )));
            }
        }
        Ok(())
    }
}

/// A thread-safe in-memory store for employee records.
///
/// Identifiers are handed out sequentially from 1 and listing follows id order.
/// Ideal for testing or running without persistence.
#[derive(Default, Clone)]
pub struct InMemoryEmployeeStore {
    records: Arc<RwLock<Records>>,
}

impl InMemoryEmployeeStore {
    /// Creates a new, empty in-memory employee store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn insert(&self, employee: NewEmployee) -> Result<Employee> {
        let mut records = self.records.write().await;
        records.check_unique(None, &employee.details.email, &employee.details.payroll_id)?;

        records.last_id += 1;
        let employee = employee.into_employee(records.last_id);
        records.employees.insert(employee.id(), employee.clone());
        Ok(employee)
    }

    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let records = self.records.read().await;
        Ok(records.employees.get(&id).cloned())
    }

    async fn save(&self, employee: Employee) -> Result<()> {
        let mut records = self.records.write().await;
        records.check_unique(Some(employee.id()), employee.email(), employee.payroll_id())?;
        records.employees.insert(employee.id(), employee);
        Ok(())
    }

    async fn delete(&self, id: EmployeeId) -> Result<()> {
        let mut records = self.records.write().await;
        records.employees.remove(&id);
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Employee>> {
        let records = self.records.read().await;
        Ok(records
            .employees
            .values()
            .skip(page.offset())
            .take(page.size)
            .cloned()
            .collect())
    }
}

/// Notifier that keeps every accepted event in memory.
///
/// Clones share the same log, so a test can hand one clone to the service and
/// inspect the other.
#[derive(Default, Clone)]
pub struct InMemoryNotifier {
    sent: Arc<RwLock<Vec<AllowanceChangeEvent>>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events accepted so far, oldest first.
    pub async fn sent(&self) -> Vec<AllowanceChangeEvent> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn send(&self, event: &AllowanceChangeEvent) -> Result<()> {
        self.sent.write().await.push(event.clone());
        Ok(())
    }
}
