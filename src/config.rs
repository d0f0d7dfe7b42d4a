//! Runtime configuration, read once from the environment at startup.
//!
//! Every deployment knob lives here; nothing else in the service reads
//! environment variables.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::warn;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// Message bus address; events are dropped when unset.
    pub nats_url: Option<String>,
    /// Allowed CORS origin; permissive when unset.
    pub cors_origin: Option<String>,
    /// Cap on concurrently processed requests.
    pub max_in_flight: usize,
    pub currency: String,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self {
            port: parse_or("PORT", 8080),
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
            nats_url: env::var("NATS_URL").ok(),
            cors_origin: env::var("CORS_ORIGIN").ok(),
            max_in_flight: parse_or("MAX_IN_FLIGHT_REQUESTS", 256),
            currency: env::var("CURRENCY").unwrap_or_else(|_| "USD".to_string()),
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("invalid {key} value {raw:?}, using default {default}");
            default
        }),
        Err(_) => default,
    }
}
