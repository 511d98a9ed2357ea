use derive_more::Display;

/// Which uniqueness rule a write collided with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum UniqueKey {
    #[display(fmt = "Employee ID")]
    EmployeeId,
    #[display(fmt = "Email")]
    Email,
    #[display(fmt = "Attendance for this date")]
    AttendanceDay,
}

#[derive(Debug, PartialEq, Eq, Display)]
pub enum AppError {
    /// Malformed or missing input; the message names the first bad field.
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "{} already exists", _0)]
    Conflict(UniqueKey),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// Anything else the store reported. Carries the detail for the logs
    /// only, it is never sent to the client.
    #[display(fmt = "Store error: {}", _0)]
    Store(String),
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn employee_not_found() -> Self {
        AppError::NotFound("Employee not found".to_string())
    }
}
