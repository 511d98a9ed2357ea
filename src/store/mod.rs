//! Persistence seam.
//!
//! Both backends enforce the uniqueness and foreign-key rules themselves, so
//! a violation reported here is authoritative even when an earlier read
//! suggested the write was safe.

pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use chrono::NaiveDate;
use derive_more::Display;

use crate::error::{AppError, UniqueKey};
use crate::model::attendance::{Attendance, AttendanceStatus, MarkAttendance};
use crate::model::employee::{Employee, EmployeeSummary, NewEmployee};

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

#[derive(Debug, PartialEq, Eq, Display)]
pub enum StoreError {
    #[display(fmt = "unique constraint on {} violated", _0)]
    UniqueViolation(UniqueKey),

    #[display(fmt = "referenced employee does not exist")]
    ForeignKeyViolation,

    #[display(fmt = "{}", _0)]
    Backend(String),
}

impl std::error::Error for StoreError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(key) => AppError::Conflict(key),
            StoreError::ForeignKeyViolation => AppError::employee_not_found(),
            StoreError::Backend(detail) => AppError::Store(detail),
        }
    }
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All employees in ascending `id` order with their present-day counts.
    async fn list_with_present_count(&self) -> Result<Vec<EmployeeSummary>, StoreError>;

    /// Employees whose `employee_id` or `email` equals the given values.
    async fn find_by_identity(&self, employee_id: &str, email: &str)
    -> Result<Vec<Employee>, StoreError>;

    async fn insert(&self, employee: &NewEmployee) -> Result<Employee, StoreError>;

    /// Removes the employee and its attendance. Returns false if no row matched.
    async fn delete(&self, id: u64) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Inserts or overwrites the record keyed by (employee, date) and returns
    /// the stored row.
    async fn upsert(&self, mark: &MarkAttendance) -> Result<Attendance, StoreError>;

    /// Records for one employee, most recent date first.
    async fn for_employee(&self, employee_id: u64) -> Result<Vec<Attendance>, StoreError>;

    async fn count_by_date_and_status(
        &self,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<i64, StoreError>;
}
