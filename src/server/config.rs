use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;
const DEFAULT_REFRESH_TOKEN_EXPIRE_DAYS: i64 = 7;

pub struct Config {
    pub database_url: String,

    /// Secret used to sign access and refresh tokens.
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_days: i64,

    pub bind_addr: String,
    /// Comma-separated list of allowed CORS origins, or `*` for any.
    pub allowed_origins: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            secret_key: std::env::var("SECRET_KEY")
                .map_err(|_| ConfigError::MissingEnvVar("SECRET_KEY".to_string()))?,
            access_token_expire_minutes: optional_int(
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
            )?,
            refresh_token_expire_days: optional_int(
                "REFRESH_TOKEN_EXPIRE_DAYS",
                DEFAULT_REFRESH_TOKEN_EXPIRE_DAYS,
            )?,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            allowed_origins: std::env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        })
    }
}

fn optional_int(name: &str, default: i64) -> Result<i64, AppError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidEnvVar(name.to_string(), value).into()),
        Err(_) => Ok(default),
    }
}
