use actix_web::{HttpResponse, web};
use tracing::{debug, instrument};

use crate::api::ErrorResponse;
use crate::error::AppError;
use crate::model::employee::{Employee, EmployeeSummary};
use crate::repository::EmployeeRepository;
use crate::utils::validation::{EmployeePayload, validate_employee};

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees with their present-day count", body = [EmployeeSummary]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Employee"
)]
#[instrument(name = "list_employees", skip(repo))]
pub async fn list_employees(
    repo: web::Data<EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    let employees = repo.list().await?;
    debug!(count = employees.len(), "Fetched employees");

    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid payload, or employee ID / email already taken", body = ErrorResponse, example = json!({
            "error": "Employee ID already exists"
        })),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Employee"
)]
#[instrument(
    name = "create_employee",
    skip(repo, payload),
    fields(employee_id = %payload.employee_id)
)]
pub async fn create_employee(
    repo: web::Data<EmployeeRepository>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, AppError> {
    let employee = validate_employee(payload.into_inner())?;
    let created = repo.create(employee).await?;

    Ok(HttpResponse::Created().json(created))
}

/// Delete Employee
///
/// Attendance recorded for the employee is deleted with it.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id" = u64, Path, description = "Employee surrogate id")
    ),
    responses(
        (status = 204, description = "Successfully deleted"),
        (status = 404, description = "Employee not found", body = ErrorResponse, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Employee"
)]
#[instrument(name = "delete_employee", skip(repo))]
pub async fn delete_employee(
    repo: web::Data<EmployeeRepository>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    repo.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
