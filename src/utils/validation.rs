//! Shape and format checks for incoming payloads.
//!
//! Every check is a pure function: a raw payload goes in, and either the
//! normalized domain value or the first failing field comes out. Fields are
//! inspected in a fixed order so the reported message is deterministic.

use std::borrow::Cow;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AppError;
use crate::model::attendance::{AttendanceStatus, MarkAttendance};
use crate::model::employee::NewEmployee;

pub const DATE_MESSAGE: &str = "Date must be in YYYY-MM-DD format";
pub const STATUS_MESSAGE: &str = "Status must be Present or Absent";
pub const EMPLOYEE_REF_MESSAGE: &str = "Valid internal Employee ID required";

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

const EMPLOYEE_FIELDS: [&str; 4] = ["employee_id", "full_name", "email", "department"];
const ATTENDANCE_FIELDS: [&str; 3] = ["date", "status", "employee_id"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub field: &'static str,
    pub message: String,
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        debug!(field = failure.field, message = %failure.message, "Payload rejected");
        AppError::Validation(failure.message)
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeePayload {
    #[schema(example = "EMP-001")]
    #[validate(
        length(min = 1, message = "Employee ID is required"),
        custom = "employee_id_limit"
    )]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    #[validate(
        length(min = 1, message = "Full Name is required"),
        custom = "full_name_limit"
    )]
    pub full_name: String,

    #[schema(example = "john.doe@company.com", format = "email")]
    #[validate(email(message = "Invalid email address"), custom = "email_limit")]
    pub email: String,

    #[schema(example = "Engineering")]
    #[validate(
        length(min = 1, message = "Department is required"),
        custom = "department_limit"
    )]
    pub department: String,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendancePayload {
    /// Surrogate id of the employee, not the business `employeeId`.
    #[schema(example = 1)]
    #[validate(range(min = 1, message = "Valid internal Employee ID required"))]
    pub employee_id: i64,

    #[schema(example = "2024-01-01")]
    #[validate(
        regex(path = "DATE_PATTERN", message = "Date must be in YYYY-MM-DD format"),
        custom = "calendar_date"
    )]
    pub date: String,

    #[schema(example = "Present")]
    #[validate(custom = "known_status")]
    pub status: String,
}

/// Body of the nested `/employees/{id}/attendance` route, where the employee
/// comes from the path.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DayMarkPayload {
    #[schema(example = "2024-01-01")]
    pub date: String,
    #[schema(example = "Absent")]
    pub status: String,
}

impl DayMarkPayload {
    pub fn for_employee(self, employee_id: i64) -> AttendancePayload {
        AttendancePayload {
            employee_id,
            date: self.date,
            status: self.status,
        }
    }
}

pub fn validate_employee(payload: EmployeePayload) -> Result<NewEmployee, ValidationFailure> {
    let payload = EmployeePayload {
        employee_id: payload.employee_id.trim().to_string(),
        full_name: payload.full_name.trim().to_string(),
        email: payload.email.trim().to_lowercase(),
        department: payload.department.trim().to_string(),
    };

    payload
        .validate()
        .map_err(|errors| first_failure(&errors, &EMPLOYEE_FIELDS))?;

    Ok(NewEmployee {
        employee_id: payload.employee_id,
        full_name: payload.full_name,
        email: payload.email,
        department: payload.department,
    })
}

pub fn validate_attendance(payload: AttendancePayload) -> Result<MarkAttendance, ValidationFailure> {
    payload
        .validate()
        .map_err(|errors| first_failure(&errors, &ATTENDANCE_FIELDS))?;

    let date = parse_date(&payload.date).map_err(|_| ValidationFailure {
        field: "date",
        message: DATE_MESSAGE.to_string(),
    })?;
    let status: AttendanceStatus = payload.status.parse().map_err(|_| ValidationFailure {
        field: "status",
        message: STATUS_MESSAGE.to_string(),
    })?;
    let employee_id = u64::try_from(payload.employee_id).map_err(|_| ValidationFailure {
        field: "employee_id",
        message: EMPLOYEE_REF_MESSAGE.to_string(),
    })?;

    Ok(MarkAttendance {
        employee_id,
        date,
        status,
    })
}

fn first_failure(errors: &ValidationErrors, order: &[&'static str]) -> ValidationFailure {
    let fields = errors.field_errors();
    for &field in order {
        if let Some(error) = fields.get(field).and_then(|errs| errs.first()) {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            return ValidationFailure { field, message };
        }
    }
    ValidationFailure {
        field: "payload",
        message: errors.to_string(),
    }
}

fn too_long(value: &str, max: usize, message: &'static str) -> Result<(), ValidationError> {
    if value.chars().count() <= max {
        return Ok(());
    }
    let mut error = ValidationError::new("length");
    error.message = Some(Cow::Borrowed(message));
    Err(error)
}

fn employee_id_limit(value: &str) -> Result<(), ValidationError> {
    too_long(value, 50, "Employee ID must be at most 50 characters")
}

fn full_name_limit(value: &str) -> Result<(), ValidationError> {
    too_long(value, 200, "Full Name must be at most 200 characters")
}

fn email_limit(value: &str) -> Result<(), ValidationError> {
    too_long(value, 200, "Email must be at most 200 characters")
}

fn department_limit(value: &str) -> Result<(), ValidationError> {
    too_long(value, 100, "Department must be at most 100 characters")
}

fn parse_date(value: &str) -> chrono::ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}

// The pattern admits strings like 2024-02-31.
fn calendar_date(value: &str) -> Result<(), ValidationError> {
    if parse_date(value).is_ok() {
        return Ok(());
    }
    let mut error = ValidationError::new("date");
    error.message = Some(Cow::Borrowed(DATE_MESSAGE));
    Err(error)
}

fn known_status(value: &str) -> Result<(), ValidationError> {
    if value.parse::<AttendanceStatus>().is_ok() {
        return Ok(());
    }
    let mut error = ValidationError::new("status");
    error.message = Some(Cow::Borrowed(STATUS_MESSAGE));
    Err(error)
}
