//! Engine configuration, from defaults or the environment.

use std::env;

use dotenv::dotenv;
use thiserror::Error;
use tracing::info;

const ORDER_CAPACITY: &str = "LIMIT_BOOK_ORDER_CAPACITY";
const LOG_FILLS: &str = "LIMIT_BOOK_LOG_FILLS";

const DEFAULT_ORDER_CAPACITY: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to parse environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Resting-order slots to pre-allocate
    pub order_capacity: usize,
    /// Log each fill at info level instead of debug
    pub log_fills: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
            log_fills: false,
        }
    }
}

impl EngineConfig {
    /// Load from the process environment (and a `.env` file if present).
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let order_capacity = match lookup(ORDER_CAPACITY) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| ConfigError::Invalid {
                name: ORDER_CAPACITY,
                value: raw,
            })?,
            None => defaults.order_capacity,
        };

        let log_fills = match lookup(LOG_FILLS) {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                name: LOG_FILLS,
                value: raw,
            })?,
            None => defaults.log_fills,
        };

        let config = Self {
            order_capacity,
            log_fills,
        };
        info!(?config, "engine config loaded");
        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
