use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use chrono::FixedOffset;
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    MySql,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,

    pub api_prefix: String,
    pub rate_api_per_min: u32,

    pub log_dir: String,
    pub log_level: tracing::Level,

    /// Timezone that decides which calendar day is "today" on the dashboard.
    pub utc_offset: FixedOffset,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = var_or(key, default);
    raw.parse::<T>()
        .map_err(|e| anyhow!("{} has invalid value '{}': {}", key, raw, e))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let store_backend: StoreBackend = parse_var("STORE_BACKEND", "mysql")?;
        let database_url = env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::MySql && database_url.is_none() {
            return Err(anyhow!("DATABASE_URL must be set when STORE_BACKEND=mysql"));
        }

        let offset_minutes: i32 = parse_var("UTC_OFFSET_MINUTES", "0")?;
        let utc_offset = FixedOffset::east_opt(offset_minutes * 60)
            .with_context(|| format!("UTC_OFFSET_MINUTES out of range: {}", offset_minutes))?;

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:5000"),
            store_backend,
            database_url,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", "10")?,

            api_prefix: var_or("API_PREFIX", "/api"),
            rate_api_per_min: parse_var("RATE_API_PER_MIN", "1000")?,

            log_dir: var_or("LOG_DIR", "logs"),
            log_level: parse_var("LOG_LEVEL", "info")?,

            utc_offset,
        })
    }
}
