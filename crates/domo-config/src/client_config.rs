//! Client configuration
//!
//! Parses the `domo:` section of `domo.yaml`:
//!
//! ```yaml
//! domo:
//!   host: 192.168.1.251
//!   username: utente2
//!   password: !secret domo_password
//!   timeout_secs: 10
//! ```

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::loader::load_yaml;

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE: &str = "domo.yaml";

/// Top-level key holding the client settings
const SECTION: &str = "domo";

/// Connection settings for an Eti/Domo controller
#[derive(Clone, Serialize, Deserialize)]
pub struct DomoConfig {
    /// Controller host, IP address or full endpoint URL
    pub host: String,

    pub username: String,

    pub password: String,

    /// Upper bound on a single request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl fmt::Debug for DomoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomoConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl DomoConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Load configuration from `domo.yaml` in a config directory
    pub fn load(config_dir: impl AsRef<Path>) -> ConfigResult<Self> {
        let yaml = load_yaml(config_dir.as_ref(), CONFIG_FILE)?;
        Self::from_yaml(&yaml)
    }

    /// Parse configuration from a YAML document holding a `domo:` section
    pub fn from_yaml(yaml: &Value) -> ConfigResult<Self> {
        let mapping = yaml.as_mapping().ok_or_else(|| ConfigError::InvalidValue {
            key: "root".to_string(),
            reason: "configuration must be a mapping".to_string(),
        })?;

        let section = mapping
            .get(&Value::String(SECTION.to_string()))
            .cloned()
            .ok_or_else(|| ConfigError::MissingSection {
                section: SECTION.to_string(),
            })?;

        let config: DomoConfig =
            serde_yaml::from_value(section).map_err(|e| ConfigError::InvalidValue {
                key: "domo".to_string(),
                reason: e.to_string(),
            })?;

        if config.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "domo.host".to_string(),
                reason: "host cannot be empty".to_string(),
            });
        }
        if config.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "domo.timeout_secs".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }

        Ok(config)
    }

    /// Command endpoint URL for the configured host
    pub fn base_url(&self) -> String {
        domo_core::base_url(&self.host)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
