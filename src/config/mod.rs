use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

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
    pub company: CompanyConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// Upper bound in days for report and export date ranges
    pub report_max_range_days: i64,
}

/// Company identity stamped into SAF-T exports and receipt documents
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
    /// NIF — Angolan tax registration number
    pub tax_registration_number: String,
    pub address: String,
    pub city: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub session_ttl_hours: i64,
    pub rate_limit_per_minute: u32,
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
                report_max_range_days: env::var("REPORT_MAX_RANGE_DAYS")
                    .unwrap_or_else(|_| "365".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid REPORT_MAX_RANGE_DAYS".to_string())
                    })?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            company: CompanyConfig {
                name: env::var("COMPANY_NAME")
                    .map_err(|_| AppError::Configuration("COMPANY_NAME not set".to_string()))?,
                tax_registration_number: env::var("COMPANY_NIF")
                    .map_err(|_| AppError::Configuration("COMPANY_NIF not set".to_string()))?,
                address: env::var("COMPANY_ADDRESS").unwrap_or_else(|_| "".to_string()),
                city: env::var("COMPANY_CITY").unwrap_or_else(|_| "Luanda".to_string()),
            },
            security: SecurityConfig {
                session_ttl_hours: env::var("SESSION_TTL_HOURS")
                    .unwrap_or_else(|_| "12".to_string())
                    .parse()
                    .map_err(|_| AppError::Configuration("Invalid SESSION_TTL_HOURS".to_string()))?,
                rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                    .unwrap_or_else(|_| "1000".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid RATE_LIMIT_PER_MINUTE".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.security.session_ttl_hours <= 0 {
            return Err(AppError::Configuration(
                "Session TTL must be greater than 0".to_string(),
            ));
        }

        if self.security.rate_limit_per_minute == 0 {
            return Err(AppError::Configuration(
                "Rate limit must be greater than 0".to_string(),
            ));
        }

        if self.app.report_max_range_days <= 0 {
            return Err(AppError::Configuration(
                "Report range bound must be greater than 0".to_string(),
            ));
        }

        if self.company.tax_registration_number.trim().is_empty() {
            return Err(AppError::Configuration(
                "Company NIF must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
