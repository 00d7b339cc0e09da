use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use crate::auth::MAX_EXPIRY_MINUTES;

/// Settings the server refuses to start with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_TOKEN_KEY is not set")]
    MissingTokenKey,

    #[error("JWT_DASHBOARD_EXPIRY_MINUTES must be between 1 and {max}, got {0}", max = MAX_EXPIRY_MINUTES)]
    ExpiryOutOfRange(i64),

    #[error("API_DEFAULT_PAGE_SIZE must be positive, got {0}")]
    PageSizeOutOfRange(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Leader (read-write) connection string.
    pub leader_url: Option<String>,
    /// Replica connection string; reads fall back to the leader when unset.
    pub follower_url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub enable_query_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub token_key: String,
    pub dashboard_expiry_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub default_page_size: i64,
    pub enable_request_logging: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    /// Checks the values every login or list request depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.token_key.is_empty() {
            return Err(ConfigError::MissingTokenKey);
        }
        let expiry = self.jwt.dashboard_expiry_minutes;
        if !(1..=MAX_EXPIRY_MINUTES).contains(&expiry) {
            return Err(ConfigError::ExpiryOutOfRange(expiry));
        }
        if self.api.default_page_size < 1 {
            return Err(ConfigError::PageSizeOutOfRange(self.api.default_page_size));
        }
        Ok(())
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.leader_url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_FOLLOWER_URL") {
            self.database.follower_url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_ENABLE_QUERY_LOGGING") {
            self.database.enable_query_logging = v.parse().unwrap_or(self.database.enable_query_logging);
        }

        // JWT overrides
        if let Ok(v) = env::var("JWT_TOKEN_KEY") {
            self.jwt.token_key = v;
        }
        if let Ok(v) = env::var("JWT_DASHBOARD_EXPIRY_MINUTES") {
            self.jwt.dashboard_expiry_minutes = v.parse().unwrap_or(self.jwt.dashboard_expiry_minutes);
        }

        // API overrides
        if let Some(port) = env::var("SHOPDESK_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("API_DEFAULT_PAGE_SIZE") {
            self.api.default_page_size = v.parse().unwrap_or(self.api.default_page_size);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                leader_url: None,
                follower_url: None,
                max_connections: 10,
                connection_timeout: 30,
                enable_query_logging: true,
            },
            jwt: JwtConfig {
                token_key: String::new(),
                dashboard_expiry_minutes: 60 * 24,
            },
            api: ApiConfig {
                port: 3000,
                default_page_size: 10,
                enable_request_logging: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                leader_url: None,
                follower_url: None,
                max_connections: 20,
                connection_timeout: 10,
                enable_query_logging: true,
            },
            jwt: JwtConfig {
                token_key: String::new(),
                dashboard_expiry_minutes: 120,
            },
            api: ApiConfig {
                port: 3000,
                default_page_size: 10,
                enable_request_logging: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                leader_url: None,
                follower_url: None,
                max_connections: 50,
                connection_timeout: 5,
                enable_query_logging: false,
            },
            jwt: JwtConfig {
                token_key: String::new(),
                dashboard_expiry_minutes: 30,
            },
            api: ApiConfig {
                port: 3000,
                default_page_size: 10,
                enable_request_logging: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
