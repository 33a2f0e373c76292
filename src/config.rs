use crate::error::ConfigError;
use serde_derive::Deserialize;
use std::str::FromStr;
use std::time::Duration;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    envy::from_env::<AppConfig>().map_err(ConfigError::env_parse)
}

/// How the system statistics table treats rows that are not label/value pairs.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Fail the extraction on the first malformed row.
    #[default]
    Strict,
    /// Skip malformed rows.
    Lenient,
}

fn default_cache_timeout_sec() -> u64 {
    5
}

fn default_request_timeout_sec() -> u64 {
    10
}

#[derive(Deserialize, Debug, Clone)]
pub struct EnvoyConfig {
    /// Device IP address or hostname, without scheme
    pub host: String,
    #[serde(default = "default_cache_timeout_sec")]
    pub cache_timeout_sec: u64,
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
    #[serde(default)]
    pub system_stats_rows: RowPolicy,
}

impl EnvoyConfig {
    /// Config for `host` with every other field at its default.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            cache_timeout_sec: default_cache_timeout_sec(),
            request_timeout_sec: default_request_timeout_sec(),
            system_stats_rows: RowPolicy::default(),
        }
    }

    pub fn with_cache_timeout_sec(mut self, seconds: u64) -> Self {
        self.cache_timeout_sec = seconds;
        self
    }

    pub fn with_request_timeout_sec(mut self, seconds: u64) -> Self {
        self.request_timeout_sec = seconds;
        self
    }

    pub fn with_system_stats_rows(mut self, policy: RowPolicy) -> Self {
        self.system_stats_rows = policy;
        self
    }

    pub fn cache_timeout(&self) -> Duration {
        Duration::from_secs(self.cache_timeout_sec)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_sec)
    }

    /// Base URL of the device. A bare host gets an `http://` prefix.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid("host", "must not be empty"));
        }
        if self.request_timeout_sec == 0 {
            return Err(ConfigError::invalid(
                "request_timeout_sec",
                "must be greater than zero",
            ));
        }
        Ok(self)
    }
}

pub fn load_envoy_config() -> Result<EnvoyConfig, ConfigError> {
    envy::prefixed("ENVOY_")
        .from_env::<EnvoyConfig>()
        .map_err(ConfigError::env_parse)?
        .validate()
}

#[derive(Deserialize, Debug, Default)]
pub struct PollConfig {
    // print once and exit when unset
    pub interval_sec: Option<u64>,
}

pub fn load_poll_config() -> Result<PollConfig, ConfigError> {
    envy::prefixed("POLL_")
        .from_env::<PollConfig>()
        .map_err(ConfigError::env_parse)
}
