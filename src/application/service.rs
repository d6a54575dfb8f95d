use crate::domain::allowance::monthly_allowance;
use crate::domain::employee::{Employee, EmployeeDetails, EmployeeId, NewEmployee};
use crate::domain::notification::AllowanceChangeEvent;
use crate::domain::ports::{EmployeeStoreBox, NotifierBox, PageRequest};
use crate::error::{PayrollError, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Source of the current instant, swappable in tests.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Entry point for every operation on employee records.
///
/// `EmployeeService` owns the record store and the notification channel. Reads and
/// writes go straight to the store; updates additionally publish an
/// [`AllowanceChangeEvent`] when the monthly allowance moves.
pub struct EmployeeService {
    store: EmployeeStoreBox,
    notifier: NotifierBox,
    clock: Clock,
}

impl EmployeeService {
    /// Creates a new `EmployeeService` reading the wall clock.
    ///
    /// # Arguments
    ///
    /// * `store` - The store holding employee records.
    /// * `notifier` - The channel allowance changes are published to.
    pub fn new(store: EmployeeStoreBox, notifier: NotifierBox) -> Self {
        Self::with_clock(store, notifier, Box::new(Utc::now))
    }

    pub fn with_clock(store: EmployeeStoreBox, notifier: NotifierBox, clock: Clock) -> Self {
        Self {
            store,
            notifier,
            clock,
        }
    }

    pub async fn list_employees(&self, page: PageRequest) -> Result<Vec<Employee>> {
        self.store.list(page).await
    }

    pub async fn get_employee(&self, id: EmployeeId) -> Result<Employee> {
        self.find_employee(id).await
    }

    /// Persists a new record. Its salary-change date is the creation instant.
    /// No notification is sent.
    pub async fn create_employee(&self, details: EmployeeDetails) -> Result<Employee> {
        let employee = self.store.insert(NewEmployee::new(details, (self.clock)())).await?;
        info!(employee = ?employee, "Saved employee");
        Ok(employee)
    }

    /// Replaces every field of the record with `details`.
    ///
    /// Both allowances are computed before the record is touched: the current one
    /// from the stored salary and percentage, the new one from the incoming values.
    /// When they differ, an event built from the updated record is published after
    /// the record has been persisted. A failed publish is logged and does not fail
    /// the update, which is already durable at that point.
    pub async fn update_employee(&self, id: EmployeeId, details: EmployeeDetails) -> Result<Employee> {
        let mut employee = self.find_employee(id).await?;
        info!(employee = ?employee, "About to update employee");

        let current_allowance = monthly_allowance(employee.annual_salary(), employee.salary_allowance_percentage())?;
        let new_allowance = monthly_allowance(details.annual_salary, details.salary_allowance_percentage)?;

        let salary_changed = employee.apply(details, (self.clock)());

        self.store.save(employee.clone()).await?;
        info!(employee = ?employee, salary_changed, "Updated employee");

        if current_allowance != new_allowance {
            let event = AllowanceChangeEvent::new(&employee, current_allowance, new_allowance);
            match self.notifier.send(&event).await {
                Ok(()) => info!(
                    employee_id = id,
                    current_monthly_allowance = %current_allowance,
                    new_monthly_allowance = %new_allowance,
                    "Published allowance change"
                ),
                Err(e) => warn!(
                    employee_id = id,
                    error = %e,
                    "Failed to publish allowance change; the update stands"
                ),
            }
        }

        Ok(employee)
    }

    pub async fn delete_employee(&self, id: EmployeeId) -> Result<()> {
        self.store.delete(id).await?;
        info!(employee_id = id, "Deleted employee");
        Ok(())
    }

    async fn find_employee(&self, id: EmployeeId) -> Result<Employee> {
        self.store.get(id).await?.ok_or(PayrollError::NotFound(id))
    }
}
