use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid {0}: {1}")]
    Invalid(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub whatsapp: WhatsAppConfig,
}

#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    /// Base URL of the WhatsApp HTTP API.
    pub api_url: String,
    /// Id of the sending account (the API's phone-number id).
    pub sender_id: String,
    pub access_token: String,
    /// Upper bound on one outbound send; a slow send must not stall its
    /// request indefinitely.
    pub send_timeout: Duration,
}

fn var_or(name: &'static str, default: &str) -> String {
    dotenvy::var(name).unwrap_or_else(|_| default.to_string())
}

fn var(name: &'static str) -> Result<String, ConfigError> {
    dotenvy::var(name).map_err(|_| ConfigError::Missing(name))
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = var_or("BIND_ADDR", "0.0.0.0:8080")
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid("BIND_ADDR", e.to_string()))?;

        let timeout_secs: u64 = var_or("WHATSAPP_SEND_TIMEOUT_SECS", "10")
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid("WHATSAPP_SEND_TIMEOUT_SECS", e.to_string())
            })?;

        Ok(Self {
            database_url: var_or("DATABASE_URL", "sqlite://data/users.db?mode=rwc"),
            bind_addr,
            whatsapp: WhatsAppConfig {
                api_url: var_or("WHATSAPP_API_URL", "https://graph.facebook.com/v21.0"),
                sender_id: var("WHATSAPP_SENDER_ID")?,
                access_token: var("WHATSAPP_ACCESS_TOKEN")?,
                send_timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}
