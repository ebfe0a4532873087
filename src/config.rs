//! Service configuration loaded from environment variables

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub const ENV_HOST: &str = "BOARD_HOST";
pub const ENV_PORT: &str = "BOARD_PORT";
pub const ENV_DATA_FILE: &str = "BOARD_DATA_FILE";
pub const ENV_LOG_LEVEL: &str = "BOARD_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "BOARD_LOG_JSON";

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for the message board service
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Address to bind
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// JSON document holding the message log
    pub data_file: PathBuf,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Emit logs as JSON lines
    pub json_logs: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            data_file: PathBuf::from("data/messages.json"),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl BoardConfig {
    /// Load from the process environment, after applying a `.env` file if one
    /// is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup. Unset keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_HOST) {
            config.host = value.parse().map_err(|err: std::net::AddrParseError| {
                invalid(ENV_HOST, &value, err.to_string())
            })?;
        }

        if let Some(value) = lookup(ENV_PORT) {
            config.port = value.parse().map_err(|err: std::num::ParseIntError| {
                invalid(ENV_PORT, &value, err.to_string())
            })?;
        }

        if let Some(value) = lookup(ENV_DATA_FILE) {
            if value.trim().is_empty() {
                return Err(invalid(ENV_DATA_FILE, &value, "must not be empty".to_string()));
            }
            config.data_file = PathBuf::from(value);
        }

        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            config.log_level = value;
        }

        if let Some(value) = lookup(ENV_LOG_JSON) {
            config.json_logs = parse_bool(&value)
                .ok_or_else(|| invalid(ENV_LOG_JSON, &value, "expected true or false".to_string()))?;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn invalid(key: &'static str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
