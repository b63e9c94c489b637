//! Configuration loading for the Eti/Domo client
//!
//! Settings live in `domo.yaml` inside a configuration directory. Two custom
//! YAML tags are resolved while loading:
//!
//! - `!secret key` - Substitute from secrets.yaml
//! - `!env_var VAR` - Environment variable substitution
//!
//! # Example
//!
//! ```ignore
//! use domo_config::DomoConfig;
//!
//! let config = DomoConfig::load("/etc/domo")?;
//! println!("{}", config.base_url());
//! ```

mod client_config;
mod error;
mod loader;
mod secrets;

pub use client_config::{DomoConfig, CONFIG_FILE};
pub use error::{ConfigError, ConfigResult};
pub use loader::{load_yaml, YamlLoader};
pub use secrets::SECRETS_FILE;

// Re-export serde_yaml::Value for convenience
pub use serde_yaml::Value;
