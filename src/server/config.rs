use chrono::NaiveTime;
use std::net::SocketAddr;
use url::Url;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_WORK_DAY_START: &str = "09:00";
const DEFAULT_STANDARD_WORK_HOURS: f64 = 8.0;

pub struct Config {
    pub database_url: String,
    pub app_url: Url,
    pub bind_addr: SocketAddr,

    /// Check-ins after this time of day (UTC) are recorded as late.
    pub work_day_start: NaiveTime,
    /// Hours per day before time counts as overtime.
    pub standard_work_hours: f64,

    /// Whether the session cookie is marked `Secure`.
    pub session_secure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = required("DATABASE_URL")?;
        let app_url = required("APP_URL")?;

        let app_url = Url::parse(&app_url).map_err(|e| invalid("APP_URL", e))?;

        let bind_addr = optional("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| invalid("BIND_ADDR", e))?;

        let work_day_start = NaiveTime::parse_from_str(
            &optional("WORK_DAY_START").unwrap_or_else(|| DEFAULT_WORK_DAY_START.to_string()),
            "%H:%M",
        )
        .map_err(|e| invalid("WORK_DAY_START", e))?;

        let standard_work_hours = match optional("STANDARD_WORK_HOURS") {
            Some(value) => value
                .parse::<f64>()
                .map_err(|e| invalid("STANDARD_WORK_HOURS", e))?,
            None => DEFAULT_STANDARD_WORK_HOURS,
        };

        let session_secure = match optional("SESSION_SECURE") {
            Some(value) => value
                .parse::<bool>()
                .map_err(|e| invalid("SESSION_SECURE", e))?,
            None => false,
        };

        Ok(Self {
            database_url,
            app_url,
            bind_addr,
            work_day_start,
            standard_work_hours,
            session_secure,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn invalid(name: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
