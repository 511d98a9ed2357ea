use anyhow::{Context, Result};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    setup_schema(&pool).await?;
    Ok(pool)
}

/// Creates the tables if missing. The unique and foreign keys here are what
/// the stores rely on to reject conflicting writes. Identity columns compare
/// byte-for-byte so `E1` and `e1` are distinct, as in the in-memory store.
pub(crate) async fn setup_schema(pool: &MySqlPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
            employee_id VARCHAR(50) COLLATE utf8mb4_bin NOT NULL,
            full_name VARCHAR(200) NOT NULL,
            email VARCHAR(200) COLLATE utf8mb4_bin NOT NULL,
            department VARCHAR(100) NOT NULL,
            PRIMARY KEY (id),
            CONSTRAINT uq_employees_employee_id UNIQUE (employee_id),
            CONSTRAINT uq_employees_email UNIQUE (email)
        ) ENGINE = InnoDB DEFAULT CHARSET = utf8mb4
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create employees table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
            employee_id BIGINT UNSIGNED NOT NULL,
            date DATE NOT NULL,
            status VARCHAR(16) NOT NULL,
            PRIMARY KEY (id),
            CONSTRAINT uq_attendance_employee_date UNIQUE (employee_id, date),
            CONSTRAINT fk_attendance_employee FOREIGN KEY (employee_id)
                REFERENCES employees (id) ON DELETE CASCADE,
            CONSTRAINT ck_attendance_status CHECK (status IN ('Present', 'Absent')),
            INDEX idx_attendance_date_status (date, status)
        ) ENGINE = InnoDB
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create attendance table")?;

    info!("Database schema ready");
    Ok(())
}
