use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::error::AppError;
use crate::model::attendance::{Attendance, AttendanceStatus, MarkAttendance};
use crate::store::AttendanceStore;

#[derive(Clone)]
pub struct AttendanceRepository {
    store: Arc<dyn AttendanceStore>,
}

impl AttendanceRepository {
    pub fn new(store: Arc<dyn AttendanceStore>) -> Self {
        Self { store }
    }

    /// Records `status` for the employee on `date`, overwriting any earlier
    /// mark for the same day. Returns the stored record.
    pub async fn mark(&self, mark: MarkAttendance) -> Result<Attendance, AppError> {
        let record = self.store.upsert(&mark).await?;
        info!(
            id = record.id,
            employee_id = record.employee_id,
            date = %record.date,
            status = %record.status,
            "Attendance marked"
        );
        Ok(record)
    }

    /// Attendance of one employee, most recent date first.
    pub async fn history(&self, employee_id: u64) -> Result<Vec<Attendance>, AppError> {
        Ok(self.store.for_employee(employee_id).await?)
    }

    pub async fn count_by_date_and_status(
        &self,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<i64, AppError> {
        Ok(self.store.count_by_date_and_status(date, status).await?)
    }
}
