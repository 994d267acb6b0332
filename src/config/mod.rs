pub mod parser;
pub mod validator;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_rules_path")]
    pub rules_path: String,
    #[serde(default = "default_initial_logs_path")]
    pub initial_logs_path: String,
    #[serde(default = "default_updated_logs_path")]
    pub updated_logs_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_alert_hide")]
    pub alert_hide_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_output")]
    pub output: String,
}

// Default values
fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_rules_path() -> String {
    "/api-rule/rule".to_string()
}

fn default_initial_logs_path() -> String {
    "/api-logs/initial-logs".to_string()
}

fn default_updated_logs_path() -> String {
    "/api-logs/updated-logs".to_string()
}

fn default_poll_interval() -> u64 {
    10_000
}

fn default_alert_hide() -> u64 {
    5_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_output() -> String {
    "stderr".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            rules_path: default_rules_path(),
            initial_logs_path: default_initial_logs_path(),
            updated_logs_path: default_updated_logs_path(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            alert_hide_ms: default_alert_hide(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            output: default_log_output(),
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl LogsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn alert_hide_after(&self) -> Duration {
        Duration::from_millis(self.alert_hide_ms)
    }
}

impl Config {
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        parser::parse_config(path)
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<Vec<String>> {
        validator::validate_config(self)
    }

    pub fn to_toml(&self) -> Result<String> {
        parser::render_config(self)
    }
}
