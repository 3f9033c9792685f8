//! FILENAME: app/src/config.rs
// PURPOSE: Connection and logging settings, read from the environment.
// CONTEXT: A `.env` file in the working directory is loaded first (dotenvy),
// real environment variables win over it.

use crate::logging::LogLevel;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use thiserror::Error;

/// Reporting view queried when `CARTEIRA_VIEW` is not set.
pub const DEFAULT_VIEW: &str = "VW_CONSULTA_GERAL";

pub const ENV_DB_HOST: &str = "CARTEIRA_DB_HOST";
pub const ENV_DB_PORT: &str = "CARTEIRA_DB_PORT";
pub const ENV_DB_USER: &str = "CARTEIRA_DB_USER";
pub const ENV_DB_PASSWORD: &str = "CARTEIRA_DB_PASSWORD";
pub const ENV_DB_NAME: &str = "CARTEIRA_DB_NAME";
pub const ENV_VIEW: &str = "CARTEIRA_VIEW";
pub const ENV_LOG_FILE: &str = "CARTEIRA_LOG_FILE";
pub const ENV_LOG_LEVEL: &str = "CARTEIRA_LOG_LEVEL";

/// Plain or schema-qualified SQL identifier. The view name is spliced into
/// the query text, so nothing else is accepted.
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$").unwrap());

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Parameters of the single database connection.
#[derive(Clone, PartialEq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `None` when no database settings are present (offline runs).
    pub database: Option<DatabaseConfig>,
    pub view: String,
    pub log_file: Option<PathBuf>,
    pub log_level: LogLevel,
}

impl AppConfig {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let view = get(ENV_VIEW).unwrap_or_else(|| DEFAULT_VIEW.to_string());
        if !IDENTIFIER.is_match(&view) {
            return Err(ConfigError::Invalid { name: ENV_VIEW, value: view });
        }

        let log_level = match get(ENV_LOG_LEVEL) {
            Some(value) => LogLevel::parse(&value).ok_or(ConfigError::Invalid {
                name: ENV_LOG_LEVEL,
                value,
            })?,
            None => LogLevel::Info,
        };

        let database = match get(ENV_DB_NAME) {
            None => None,
            Some(database) => {
                let port = match get(ENV_DB_PORT) {
                    Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                        name: ENV_DB_PORT,
                        value,
                    })?,
                    None => 3306,
                };
                Some(DatabaseConfig {
                    host: get(ENV_DB_HOST).unwrap_or_else(|| "localhost".to_string()),
                    port,
                    user: get(ENV_DB_USER).ok_or(ConfigError::Missing(ENV_DB_USER))?,
                    password: lookup(ENV_DB_PASSWORD).unwrap_or_default(),
                    database,
                })
            }
        };

        Ok(AppConfig {
            database,
            view,
            log_file: get(ENV_LOG_FILE).map(PathBuf::from),
            log_level,
        })
    }

    /// The database settings, or an error naming what is missing.
    pub fn require_database(&self) -> Result<&DatabaseConfig, ConfigError> {
        self.database.as_ref().ok_or(ConfigError::Missing(ENV_DB_NAME))
    }
}
