use crate::api::ErrorResponse;
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::employee::{Employee, EmployeeSummary};
use crate::repository::DashboardStats;
use crate::utils::validation::{AttendancePayload, DayMarkPayload, EmployeePayload};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A small record keeper for employees and their daily attendance.

### Key Features
- **Employees**
  - Add, list and delete employees. Employee ID and email are unique.
  - The list shows how many days each employee was marked present.
- **Attendance**
  - Mark an employee Present or Absent for a calendar day.
    Marking the same day again overwrites the earlier status.
  - View an employee's history, most recent day first.
- **Dashboard**
  - Total employees and how many are present today.

### Response Format
- JSON bodies with camelCase field names.
- Failures return `{"error": "<message>"}`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::attendance_history,
        crate::api::attendance::mark_employee_attendance,
        crate::api::attendance::employee_attendance_history,

        crate::api::dashboard::dashboard_stats
    ),
    components(
        schemas(
            Employee,
            EmployeeSummary,
            EmployeePayload,
            Attendance,
            AttendanceStatus,
            AttendancePayload,
            DayMarkPayload,
            DashboardStats,
            ErrorResponse
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Dashboard", description = "Dashboard counters"),
        (name = "Health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;
