//! Service configuration.
//!
//! Layered in increasing precedence: built-in defaults, an optional YAML
//! file, then `CATALOGD_*` environment variables. Defaults match the
//! reference deployment: a local bind address, a 15-minute cache TTL, and
//! the two local frontend origins allowed through CORS.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "catalogd.yaml";

/// Environment variable prefix, e.g. `CATALOGD_BIND=0.0.0.0:8080`.
const ENV_PREFIX: &str = "CATALOGD_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),
}

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// TCP address the HTTP server binds to.
    pub bind: String,
    /// Snapshot time-to-live, in seconds.
    pub cache_ttl_secs: u64,
    /// Origins allowed through CORS. `"*"` permits all.
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            cache_ttl_secs: 15 * 60,
            allowed_origins: vec![
                "https://localhost:7000".to_string(),
                "http://localhost:5000".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

impl Config {
    /// Loads configuration from the default file location and environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_CONFIG_FILE)
    }

    /// Loads configuration layering defaults, the given YAML file (if it
    /// exists), and `CATALOGD_*` environment variables.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        Ok(config)
    }

    /// The snapshot TTL as a [`Duration`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
