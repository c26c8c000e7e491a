//! Console configuration domain models.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Configuration loaded from `evalctl.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Admin API configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Job polling configuration.
    #[serde(default)]
    pub polling: PollingConfig,
}

impl ConsoleConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.api.validate()?;
        self.polling.validate()?;
        Ok(())
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the versioned API, e.g. `http://localhost:8082/api/v1`.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_secs: default_timeout() }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("api.timeout_secs must be greater than 0"));
        }
        if self.base_url.cannot_be_a_base() {
            return Err(AppError::config_error(format!(
                "api.base_url '{}' cannot be used as a base URL",
                self.base_url
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> Url {
    Url::parse("http://localhost:8082/api/v1").expect("Default API URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

/// Job polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollingConfig {
    /// Interval between status queries for a job the user is watching.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Interval used when following already-running jobs in the background.
    #[serde(default = "default_background_interval_ms")]
    pub background_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            background_interval_ms: default_background_interval_ms(),
        }
    }
}

impl PollingConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.interval_ms == 0 {
            return Err(AppError::config_error("polling.interval_ms must be greater than 0"));
        }
        if self.background_interval_ms == 0 {
            return Err(AppError::config_error(
                "polling.background_interval_ms must be greater than 0",
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn background_interval(&self) -> Duration {
        Duration::from_millis(self.background_interval_ms)
    }
}

fn default_interval_ms() -> u64 {
    3000
}

fn default_background_interval_ms() -> u64 {
    10_000
}
