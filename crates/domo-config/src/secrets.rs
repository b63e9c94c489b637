//! `secrets.yaml` lookup behind `!secret` tags
//!
//! Credentials are usually kept out of `domo.yaml` and referenced with
//! `!secret key`. The secrets file is a flat mapping in the same directory;
//! a missing file behaves like an empty one.

use crate::error::{ConfigError, ConfigResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Name of the secrets file inside the config directory
pub const SECRETS_FILE: &str = "secrets.yaml";

/// Flat key/value mapping read from `secrets.yaml`
#[derive(Debug, Clone, Default)]
pub(crate) struct Secrets {
    entries: Mapping,
}

impl Secrets {
    pub(crate) fn load(config_dir: &Path) -> ConfigResult<Self> {
        let path = config_dir.join(SECRETS_FILE);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No secrets file");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::ReadFile { path, source }),
        };

        let document: Value =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::ParseYaml {
                path: path.clone(),
                source,
            })?;

        let entries = match document {
            Value::Mapping(entries) => entries,
            Value::Null => Mapping::new(),
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: SECRETS_FILE.to_string(),
                    reason: "secrets must be a mapping".to_string(),
                })
            }
        };

        debug!(count = entries.len(), "Loaded secrets");
        Ok(Self { entries })
    }

    /// Text substituted for `!secret key`
    ///
    /// Scalars are rendered as strings so that all-digit passwords, which
    /// YAML reads as numbers, come back verbatim.
    pub(crate) fn resolve(&self, key: &str) -> ConfigResult<String> {
        match self.entries.get(key) {
            Some(Value::String(secret)) => Ok(secret.clone()),
            Some(Value::Number(secret)) => Ok(secret.to_string()),
            Some(Value::Bool(secret)) => Ok(secret.to_string()),
            Some(Value::Null) => Ok(String::new()),
            Some(_) => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                reason: "secret must be a scalar".to_string(),
            }),
            None => Err(ConfigError::SecretNotFound {
                key: key.to_string(),
            }),
        }
    }
}
