use actix_web::{HttpResponse, web};
use tracing::instrument;

use crate::api::ErrorResponse;
use crate::error::AppError;
use crate::repository::{Dashboard, DashboardStats};

/// Dashboard counters
///
/// `presentToday` counts employees marked Present on the current date in the
/// configured timezone (UTC unless `UTC_OFFSET_MINUTES` says otherwise).
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Headcount and today's presence", body = DashboardStats),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
#[instrument(name = "dashboard_stats", skip(dashboard))]
pub async fn dashboard_stats(dashboard: web::Data<Dashboard>) -> Result<HttpResponse, AppError> {
    let stats = dashboard.stats().await?;

    Ok(HttpResponse::Ok().json(stats))
}
