//! Application configuration loaded from environment variables
//!
//! A `.env` file in the working directory is read first when present.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `APP_HOST` | `0.0.0.0` | address the HTTP server binds to |
//! | `APP_PORT` | `3000` | port the HTTP server binds to |
//! | `LOG_FORMAT` | `pretty` | `pretty` or `json` log lines |
//! | `ACCOUNT_ID_STRATEGY` | `uuid` | `uuid` or `sequential` account ids |

use std::env;
use std::str::FromStr;

use crate::traits::{IdGenerator, SequentialIdGenerator, UuidGenerator};

/// Errors raised while reading configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}', expected 'pretty' or 'json'")),
        }
    }
}

/// How account identifiers are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    #[default]
    Uuid,
    Sequential,
}

impl IdStrategy {
    /// Build the generator for this strategy
    pub fn generator(&self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Uuid => Box::new(UuidGenerator),
            IdStrategy::Sequential => Box::new(SequentialIdGenerator::new()),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uuid" => Ok(IdStrategy::Uuid),
            "sequential" => Ok(IdStrategy::Sequential),
            other => Err(format!(
                "unknown id strategy '{other}', expected 'uuid' or 'sequential'"
            )),
        }
    }
}

/// Runtime configuration of the server binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_host: String,
    pub app_port: u16,
    pub log_format: LogFormat,
    pub id_strategy: IdStrategy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_host: "0.0.0.0".to_string(),
            app_port: 3000,
            log_format: LogFormat::default(),
            id_strategy: IdStrategy::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            app_host: lookup("APP_HOST").unwrap_or(defaults.app_host),
            app_port: parse_optional(&lookup, "APP_PORT", defaults.app_port)?,
            log_format: parse_optional(&lookup, "LOG_FORMAT", defaults.log_format)?,
            id_strategy: parse_optional(&lookup, "ACCOUNT_ID_STRATEGY", defaults.id_strategy)?,
        })
    }

    /// `host:port` the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

fn parse_optional<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: ToString,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
    }
}
