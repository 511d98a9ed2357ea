use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{AppError, UniqueKey};
use crate::model::employee::{Employee, EmployeeSummary, NewEmployee};
use crate::store::EmployeeStore;

#[derive(Clone)]
pub struct EmployeeRepository {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeRepository {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Every employee with its derived `presentCount`, in insertion order.
    pub async fn list(&self) -> Result<Vec<EmployeeSummary>, AppError> {
        Ok(self.store.list_with_present_count().await?)
    }

    /// Inserts the employee unless its `employee_id` or `email` is taken.
    ///
    /// The lookup only produces a friendlier answer in the common case; the
    /// store's unique constraints decide when two requests race.
    pub async fn create(&self, employee: NewEmployee) -> Result<Employee, AppError> {
        let existing = self
            .store
            .find_by_identity(&employee.employee_id, &employee.email)
            .await?;

        if existing
            .iter()
            .any(|e| e.employee_id == employee.employee_id)
        {
            warn!(employee_id = %employee.employee_id, "Employee ID already taken");
            return Err(AppError::Conflict(UniqueKey::EmployeeId));
        }
        if existing.iter().any(|e| e.email == employee.email) {
            warn!(email = %employee.email, "Email already taken");
            return Err(AppError::Conflict(UniqueKey::Email));
        }
        if let Some(other) = existing.first() {
            // matched under a looser collation than ours
            warn!(employee_id = %employee.employee_id, existing = %other.employee_id, "Employee ID already taken");
            return Err(AppError::Conflict(UniqueKey::EmployeeId));
        }

        let created = self.store.insert(&employee).await?;
        info!(id = created.id, employee_id = %created.employee_id, "Employee created");
        Ok(created)
    }

    /// Removes the employee and, with it, its attendance history.
    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        if !self.store.delete(id).await? {
            return Err(AppError::employee_not_found());
        }
        info!(id, "Employee deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        Ok(self.store.count().await?)
    }
}
