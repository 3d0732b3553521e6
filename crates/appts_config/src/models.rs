// --- File: crates/appts_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for a single booking request, covering the holiday lookup and the insert.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. "secret_from_env" resolved from DATABASE_URL
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

// --- Public holiday lookup ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HolidaysConfig {
    #[serde(default = "default_holidays_base_url")]
    pub base_url: String,
    /// ISO 3166-1 alpha-2 country code used as the holiday region.
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_holidays_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

impl Default for HolidaysConfig {
    fn default() -> Self {
        Self {
            base_url: default_holidays_base_url(),
            country_code: default_country_code(),
            timeout_secs: default_holidays_timeout_secs(),
            cache_enabled: true,
            cache_capacity: default_cache_capacity(),
        }
    }
}

// --- Logging ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub holidays: HolidaysConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3333
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    5
}

fn default_holidays_base_url() -> String {
    "https://date.nager.at".to_string()
}

fn default_country_code() -> String {
    "GB".to_string()
}

fn default_holidays_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_cache_capacity() -> u64 {
    1024
}

fn default_log_level() -> String {
    "info".to_string()
}
