//! Configuration for the VAT check proxy.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Proxy configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// VIES upstream configuration
    #[serde(default)]
    pub vies: ViesConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViesConfig {
    /// VIES REST API base URL
    #[serde(default = "default_vies_url")]
    pub base_url: String,

    /// Upper bound for a single lookup (capped at 10s)
    #[serde(default = "default_vies_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// User-Agent sent with every lookup
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Requests admitted per client within one window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Sliding window length
    #[serde(default = "default_window", with = "humantime_serde")]
    pub window: Duration,

    /// Chance that a request triggers a sweep of idle clients
    #[serde(default = "default_sweep_probability")]
    pub sweep_probability: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for ViesConfig {
    fn default() -> Self {
        Self {
            base_url: default_vies_url(),
            timeout: default_vies_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window: default_window(),
            sweep_probability: default_sweep_probability(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_vies_url() -> String {
    "https://ec.europa.eu/taxation_customs/vies/rest-api".into()
}

fn default_vies_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    concat!("vat-check-proxy/", env!("CARGO_PKG_VERSION")).into()
}

fn default_max_requests() -> u32 {
    150
}

fn default_window() -> Duration {
    Duration::from_secs(3600)
}

fn default_sweep_probability() -> f64 {
    0.02
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
