use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::{Context, Result};
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod repository;
mod routes;
mod store;
mod utils;

use config::{Config, StoreBackend};
use db::init_db;

use crate::docs::ApiDoc;
use crate::repository::{AttendanceRepository, Clock, Dashboard, EmployeeRepository};
use crate::store::{AttendanceStore, EmployeeStore, MemoryStore, MySqlStore};
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

async fn open_store(config: &Config) -> Result<(Arc<dyn EmployeeStore>, Arc<dyn AttendanceStore>)> {
    match config.store_backend {
        StoreBackend::MySql => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            let pool = init_db(url, config.db_max_connections).await?;
            let store = Arc::new(MySqlStore::new(pool));
            let employees: Arc<dyn EmployeeStore> = store.clone();
            let attendance: Arc<dyn AttendanceStore> = store;
            Ok((employees, attendance))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store, data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            let employees: Arc<dyn EmployeeStore> = store.clone();
            let attendance: Arc<dyn AttendanceStore> = store;
            Ok((employees, attendance))
        }
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(backend = %config.store_backend, "Server starting...");

    let (employee_store, attendance_store) = open_store(&config).await?;

    let employees = EmployeeRepository::new(employee_store);
    let attendance = AttendanceRepository::new(attendance_store);
    let dashboard = Dashboard::new(
        employees.clone(),
        attendance.clone(),
        Clock::new(config.utc_offset),
    );

    let employees = Data::new(employees);
    let attendance = Data::new(attendance);
    let dashboard = Data::new(dashboard);

    let limiter = Arc::new(routes::build_limiter(config.rate_api_per_min)?);
    let api_prefix = config.api_prefix.clone();

    info!(addr = %config.server_addr, prefix = %api_prefix, "Listening");

    HttpServer::new(move || {
        let limiter = limiter.clone();
        let api_prefix = api_prefix.clone();
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(employees.clone())
            .app_data(attendance.clone())
            .app_data(dashboard.clone())
            .configure(move |cfg| routes::configure(cfg, &api_prefix, &limiter))
    })
    .bind(&config.server_addr)?
    .run()
    .await?;

    Ok(())
}
