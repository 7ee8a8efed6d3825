//! API server configuration
//!
//! Everything is read from environment variables (optionally seeded from a
//! `.env` file by `main`). Development gets working defaults; production
//! refuses to start without an explicit database connection string.

mod database;
mod graphql;

pub use database::{DatabaseConfig, DEFAULT_DATABASE_URL};
pub use graphql::{GraphQLConfig, DEFAULT_MAX_DEPTH};

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Missing required environment variable
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid value for environment variable
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application environment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "staging" | "stage" => Self::Staging,
            _ => Self::Development,
        })
    }
}

impl Environment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Where entity data lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment mode (development, staging, production)
    pub environment: Environment,

    /// Server port (default: 8080)
    pub port: u16,

    /// Log filter used when RUST_LOG is unset
    pub log_level: String,

    /// Storage backend serving the entity collections
    pub storage: StorageBackend,

    /// Database configuration (used by the postgres backend)
    pub database: DatabaseConfig,

    /// GraphQL execution settings
    pub graphql: GraphQLConfig,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production mode:
    /// - `DATABASE_URL` must be explicitly set
    /// - the in-memory backend is rejected
    /// - the playground is off unless `GRAPHQL_PLAYGROUND=true`
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str(&get_env_or_default("ENVIRONMENT", "development"))
            .unwrap_or_default();
        let is_production = environment.is_production();

        let storage: StorageBackend = parse_env("STORAGE_BACKEND", StorageBackend::default())?;

        if is_production {
            if storage == StorageBackend::Memory {
                bail!("STORAGE_BACKEND=memory is not allowed in production");
            }
            Self::validate_database_url()?;
        }

        Ok(Self {
            environment,
            port: parse_env("PORT", 8080u16).context("Invalid PORT value")?,
            log_level: env::var("RUST_LOG")
                .or_else(|_| env::var("LOG_LEVEL"))
                .unwrap_or_else(|_| "info".to_string()),
            storage,
            database: DatabaseConfig::from_env().context("Invalid database configuration")?,
            graphql: GraphQLConfig::from_env(!is_production)
                .context("Invalid GraphQL configuration")?,
            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        })
    }

    /// Validate that DATABASE_URL is explicitly set in production
    fn validate_database_url() -> Result<()> {
        match get_required_env("DATABASE_URL") {
            Ok(url) if !url.is_empty() => Ok(()),
            _ => {
                bail!(
                    "DATABASE_URL environment variable is required in production. \
                     Please set your PostgreSQL connection string."
                );
            }
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

/// Helper function to get a required environment variable
pub fn get_required_env(name: &str) -> ConfigResult<String> {
    env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}
