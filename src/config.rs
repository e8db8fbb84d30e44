use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use time::Weekday;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub planning: PlanningConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection settings for the booking API that owns appointment and staff
/// data.
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_staff_ttl_seconds")]
    pub staff_ttl_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    5
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_staff_ttl_seconds() -> u64 {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlanningConfig {
    /// First day of the displayed week. Locale-dependent: fr salons expect
    /// Monday-first.
    #[serde(default = "default_week_start")]
    pub week_start: String,
    /// First and last hour of the planning grid, inclusive.
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u8,
    #[serde(default = "default_day_end_hour")]
    pub day_end_hour: u8,
    /// IANA timezone of the salon, used to anchor "today".
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            week_start: default_week_start(),
            day_start_hour: default_day_start_hour(),
            day_end_hour: default_day_end_hour(),
            timezone: default_timezone(),
        }
    }
}

impl PlanningConfig {
    pub fn week_start_weekday(&self) -> Result<Weekday, String> {
        match self.week_start.to_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            other => Err(format!("unknown week start: {other:?}")),
        }
    }
}

fn default_week_start() -> String {
    "monday".to_string()
}

fn default_day_start_hour() -> u8 {
    8
}

fn default_day_end_hour() -> u8 {
    20
}

fn default_timezone() -> String {
    "Europe/Paris".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PLANORA__SERVER__PORT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("upstream.base_url", "http://localhost:4000")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("PLANORA")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(base_url) = env::var("BOOKING_API_URL") {
            builder = builder.set_override("upstream.base_url", base_url)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.upstream.base_url.is_empty() {
            return Err("Upstream base_url must not be empty".to_string());
        }
        if self.upstream.retry_attempts == 0 {
            return Err("Upstream retry_attempts must be at least 1".to_string());
        }
        self.planning.week_start_weekday()?;
        if self.planning.day_start_hour >= self.planning.day_end_hour {
            return Err("Planning day_start_hour must be before day_end_hour".to_string());
        }
        if self.planning.day_end_hour > 23 {
            return Err("Planning day_end_hour must be at most 23".to_string());
        }
        Ok(())
    }
}
