use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::client::ApiConfig;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub watch: WatchSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            watch: WatchSettings::default(),
        }
    }
}

/// Scraper backend endpoint and credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub username: String,
    /// Portal API password (loaded from environment, not from config file)
    #[serde(skip)]
    pub password: Option<String>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_submit_timeout_secs")]
    pub submit_timeout_secs: u64,
    #[serde(default = "default_status_timeout_secs")]
    pub status_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: String::new(),
            password: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            submit_timeout_secs: default_submit_timeout_secs(),
            status_timeout_secs: default_status_timeout_secs(),
        }
    }
}

impl ApiSettings {
    pub fn to_client_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            password: self.password.clone().unwrap_or_default(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            submit_timeout: Duration::from_secs(self.submit_timeout_secs),
            status_timeout: Duration::from_secs(self.status_timeout_secs),
            ..ApiConfig::default()
        }
    }
}

/// Poll scheduler settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchSettings {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl WatchSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_submit_timeout_secs() -> u64 {
    15
}

fn default_status_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_secs() -> u64 {
    5
}
