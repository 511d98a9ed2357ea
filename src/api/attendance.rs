use actix_web::{HttpResponse, web};
use tracing::{debug, instrument};

use crate::api::ErrorResponse;
use crate::error::AppError;
use crate::model::attendance::Attendance;
use crate::repository::AttendanceRepository;
use crate::utils::validation::{AttendancePayload, DayMarkPayload, validate_attendance};

async fn mark(
    repo: &AttendanceRepository,
    payload: AttendancePayload,
) -> Result<HttpResponse, AppError> {
    let mark = validate_attendance(payload)?;
    let record = repo.mark(mark).await?;

    Ok(HttpResponse::Created().json(record))
}

async fn history(repo: &AttendanceRepository, employee_id: u64) -> Result<HttpResponse, AppError> {
    let records = repo.history(employee_id).await?;
    debug!(employee_id, count = records.len(), "Fetched attendance history");

    Ok(HttpResponse::Ok().json(records))
}

/// Mark attendance
///
/// Marking the same employee twice on one day overwrites the earlier status.
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendancePayload,
    responses(
        (status = 201, description = "Attendance stored", body = Attendance),
        (status = 400, description = "Invalid payload", body = ErrorResponse, example = json!({
            "error": "Date must be in YYYY-MM-DD format"
        })),
        (status = 404, description = "Employee not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
#[instrument(name = "mark_attendance", skip(repo, payload))]
pub async fn mark_attendance(
    repo: web::Data<AttendanceRepository>,
    payload: web::Json<AttendancePayload>,
) -> Result<HttpResponse, AppError> {
    mark(&repo, payload.into_inner()).await
}

/// Attendance history of one employee, most recent first
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee surrogate id")
    ),
    responses(
        (status = 200, description = "Attendance ordered by date descending", body = [Attendance]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_history", skip(repo))]
pub async fn attendance_history(
    repo: web::Data<AttendanceRepository>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    history(&repo, path.into_inner()).await
}

/// Mark attendance for the employee in the path
#[utoipa::path(
    post,
    path = "/api/employees/{id}/attendance",
    params(
        ("id" = i64, Path, description = "Employee surrogate id")
    ),
    request_body = DayMarkPayload,
    responses(
        (status = 201, description = "Attendance stored", body = Attendance),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
#[instrument(name = "mark_employee_attendance", skip(repo, payload))]
pub async fn mark_employee_attendance(
    repo: web::Data<AttendanceRepository>,
    path: web::Path<i64>,
    payload: web::Json<DayMarkPayload>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner().for_employee(path.into_inner());
    mark(&repo, payload).await
}

/// Attendance history of the employee in the path
#[utoipa::path(
    get,
    path = "/api/employees/{id}/attendance",
    params(
        ("id" = u64, Path, description = "Employee surrogate id")
    ),
    responses(
        (status = 200, description = "Attendance ordered by date descending", body = [Attendance]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
#[instrument(name = "employee_attendance_history", skip(repo))]
pub async fn employee_attendance_history(
    repo: web::Data<AttendanceRepository>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    history(&repo, path.into_inner()).await
}
