use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub cors_allowed_origin: Option<String>,
    pub app_env: String,
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://quizdesk.db".to_string()),
            database_max_connections: parsed_var("DATABASE_MAX_CONNECTIONS").unwrap_or(5),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: parsed_var("WEB_SERVER_PORT").unwrap_or(3000),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: parsed_var("JWT_EXPIRATION_HOURS").unwrap_or(24),
            argon2_memory_kib: parsed_var("ARGON2_MEMORY_KIB")
                .unwrap_or(argon2::Params::DEFAULT_M_COST),
            argon2_iterations: parsed_var("ARGON2_ITERATIONS")
                .unwrap_or(argon2::Params::DEFAULT_T_COST),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects the insecure signing defaults. Only enforced when `APP_ENV=production`.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::ValidationError(
                "JWT_SECRET is using the default value; set it to a secure random string"
                    .to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::ValidationError(format!(
                "JWT_SECRET is too short ({}); it must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        Ok(())
    }

    pub fn test_config() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 0,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            argon2_memory_kib: 256,
            argon2_iterations: 1,
            cors_allowed_origin: None,
            app_env: "test".to_string(),
        }
    }
}
