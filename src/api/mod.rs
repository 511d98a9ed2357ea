pub mod attendance;
pub mod dashboard;
pub mod employee;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, ResponseError, web};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::error::AppError;

const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong, Contact with system admin";

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Employee ID already exists")]
    pub error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Store(detail) => {
                error!(error = %detail, "Request failed in store");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse { error: message })
    }
}

/// Malformed JSON becomes a validation failure instead of actix's plain-text 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!(error = %err, "Rejected request body");
        AppError::Validation(format!("Invalid request body: {}", err)).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        warn!(error = %err, "Rejected path parameter");
        AppError::Validation("Invalid id".to_string()).into()
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({ "ok": true }))
    ),
    tag = "Health"
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "ok": true }))
}
