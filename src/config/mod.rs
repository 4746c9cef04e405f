use crate::core::{AppError, BusinessTimezone, Result};
use crate::modules::analytics::services::MAX_WINDOW_MONTHS;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub business_utc_offset_minutes: i32,
    pub fee_table_source: FeeTableSource,
    pub analytics_window_months: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    pub enabled: bool,
    pub tick_seconds: u64,
    pub report_function_url: Option<String>,
    pub report_function_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(AppError::configuration(format!("Invalid LOG_FORMAT: {}", other))),
        }
    }
}

/// Where fee brackets come from at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeTableSource {
    Builtin,
    Database,
}

impl FromStr for FeeTableSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "builtin" => Ok(Self::Builtin),
            "database" => Ok(Self::Database),
            other => Err(AppError::configuration(format!(
                "Invalid FEE_TABLE_SOURCE: {}",
                other
            ))),
        }
    }
}

/// Read `key`, falling back to `default`, and parse it
pub(crate) fn env_or<T: FromStr>(key: &str, default: &str) -> Result<T> {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| AppError::configuration(format!("Invalid {}", key)))
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env_or("LOG_FORMAT", "text")?,
                business_utc_offset_minutes: env_or("BUSINESS_UTC_OFFSET_MINUTES", "180")?,
                fee_table_source: env_or("FEE_TABLE_SOURCE", "builtin")?,
                analytics_window_months: env_or("ANALYTICS_WINDOW_MONTHS", "6")?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            scheduler: SchedulerConfig {
                enabled: env_or("SCHEDULER_ENABLED", "false")?,
                tick_seconds: env_or("SCHEDULER_TICK_SECONDS", "60")?,
                report_function_url: env::var("REPORT_FUNCTION_URL").ok(),
                report_function_key: env::var("REPORT_FUNCTION_KEY").ok(),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.business_timezone()?;

        if !(1..=MAX_WINDOW_MONTHS).contains(&self.app.analytics_window_months) {
            return Err(AppError::configuration(format!(
                "ANALYTICS_WINDOW_MONTHS must be between 1 and {}",
                MAX_WINDOW_MONTHS
            )));
        }

        if !(1..=60).contains(&self.scheduler.tick_seconds) {
            return Err(AppError::configuration(
                "SCHEDULER_TICK_SECONDS must be between 1 and 60",
            ));
        }

        if self.scheduler.enabled
            && (self.scheduler.report_function_url.is_none()
                || self.scheduler.report_function_key.is_none())
        {
            return Err(AppError::configuration(
                "REPORT_FUNCTION_URL and REPORT_FUNCTION_KEY are required when the scheduler is enabled",
            ));
        }

        Ok(())
    }

    pub fn business_timezone(&self) -> Result<BusinessTimezone> {
        BusinessTimezone::from_offset_minutes(self.app.business_utc_offset_minutes).ok_or_else(
            || {
                AppError::configuration(format!(
                    "BUSINESS_UTC_OFFSET_MINUTES out of range: {}",
                    self.app.business_utc_offset_minutes
                ))
            },
        )
    }
}
