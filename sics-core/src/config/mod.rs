//! Adapter configuration: the value handed to the engine at construction.
//!
//! There is no process-wide instance. Reloading means parsing again and
//! building a new engine from the new value.

mod parser;

use std::time::Duration;

use crate::error::{ConfigError, ValidationError};
use crate::types::{Action, TeamConfig};

pub use parser::{load_config_file, parse_config_str, ConfigFormat};

pub const ENV_BASE_URL: &str = "SICS_BASE_URL";
pub const ENV_API_VERSION: &str = "SICS_API_VERSION";
pub const ENV_TIMEOUT: &str = "SICS_TIMEOUT";
pub const ENV_RETRY_ATTEMPTS: &str = "SICS_RETRY_ATTEMPTS";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdapterConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: String,

    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Per-attempt transport timeout in milliseconds.
    pub timeout: u64,

    /// Retries after the first attempt for 5xx responses.
    #[serde(rename = "retryAttempts")]
    pub retry_attempts: u32,

    pub teams: Vec<TeamConfig>,

    #[serde(default, rename = "globalActions")]
    pub global_actions: Vec<Action>,
}

impl AdapterConfig {
    pub fn new(base_url: impl Into<String>, teams: Vec<TeamConfig>) -> Self {
        Self {
            base_url: base_url.into(),
            api_version: "v1".to_string(),
            timeout: 30_000,
            retry_attempts: 3,
            teams,
            global_actions: Vec::new(),
        }
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::validate::validate_config(self)
    }

    /// Overlays `SICS_*` environment variables on top of this value.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::with_env_overrides`] with an explicit variable lookup.
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(v) = lookup(ENV_BASE_URL) {
            self.base_url = v;
        }
        if let Some(v) = lookup(ENV_API_VERSION) {
            self.api_version = v;
        }
        if let Some(v) = lookup(ENV_TIMEOUT) {
            self.timeout = v.trim().parse().map_err(|_| ConfigError::Env {
                name: ENV_TIMEOUT,
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup(ENV_RETRY_ATTEMPTS) {
            self.retry_attempts = v.trim().parse().map_err(|_| ConfigError::Env {
                name: ENV_RETRY_ATTEMPTS,
                value: v.clone(),
            })?;
        }
        Ok(self)
    }

    /// Layers `other` over `self`: scalars and teams come from `other`, global
    /// actions are concatenated with `self`'s first.
    pub fn merge(self, other: AdapterConfig) -> Self {
        let mut global_actions = self.global_actions;
        global_actions.extend(other.global_actions);
        Self {
            base_url: other.base_url,
            api_version: other.api_version,
            timeout: other.timeout,
            retry_attempts: other.retry_attempts,
            teams: other.teams,
            global_actions,
        }
    }
}
