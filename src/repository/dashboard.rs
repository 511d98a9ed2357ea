use chrono::{FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{AttendanceRepository, EmployeeRepository};
use crate::error::AppError;
use crate::model::attendance::AttendanceStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[schema(example = 25)]
    pub total_employees: i64,
    #[schema(example = 18)]
    pub present_today: i64,
}

/// Decides which calendar day "today" is, in one fixed timezone.
#[derive(Debug, Copy, Clone)]
pub struct Clock {
    offset: FixedOffset,
}

impl Clock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    #[cfg(test)]
    pub fn utc() -> Self {
        use chrono::Offset;
        Self::new(Utc.fix())
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}

#[derive(Clone)]
pub struct Dashboard {
    employees: EmployeeRepository,
    attendance: AttendanceRepository,
    clock: Clock,
}

impl Dashboard {
    pub fn new(employees: EmployeeRepository, attendance: AttendanceRepository, clock: Clock) -> Self {
        Self {
            employees,
            attendance,
            clock,
        }
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let today = self.clock.today();
        let (total_employees, present_today) = futures::try_join!(
            self.employees.count(),
            self.attendance
                .count_by_date_and_status(today, AttendanceStatus::Present),
        )?;

        Ok(DashboardStats {
            total_employees,
            present_today,
        })
    }
}
