//! Environment-driven service configuration

use crate::llm::LlmConfig;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SERVICE_NAME: &str = "BoweryConnect Crisis API";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Parse an optional environment value, rejecting anything present but malformed.
pub fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                var,
                value,
                reason: e.to_string(),
            }),
        _ => Ok(None),
    }
}

/// Top-level configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    /// JSON file replacing the built-in resource catalog
    pub catalog_path: Option<PathBuf>,
    pub service_name: String,
    pub llm: LlmConfig,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_var(lookup, "PORT")?.unwrap_or(DEFAULT_PORT),
            catalog_path: lookup("CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            service_name: lookup("SERVICE_NAME")
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            llm: LlmConfig::from_lookup(lookup)?,
        })
    }
}
