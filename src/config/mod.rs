//! Configuration loading and management
//!
//! ```yaml
//! server:
//!   listen_addr: 0.0.0.0:8080
//! reference_data:
//!   base_url: http://reference-data:3000/
//!   timeout_secs: 30
//! cache:
//!   sliding_expiration_secs: 1800
//!   absolute_expiration_secs: 3600
//! logging:
//!   level: info
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::core::error::ConfigError;
use crate::reference::ExpirationPolicy;

/// Overrides `server.listen_addr`
pub const ENV_LISTEN_ADDR: &str = "PAYVAL_LISTEN_ADDR";
/// Overrides `reference_data.base_url`
pub const ENV_REFERENCE_DATA_URL: &str = "PAYVAL_REFERENCE_DATA_URL";

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServiceConfig {
    #[validate(nested)]
    pub server: ServerConfig,

    #[validate(nested)]
    pub reference_data: ReferenceDataConfig,

    #[validate(nested)]
    pub cache: CacheConfig,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to
    #[validate(custom(function = "validate_socket_addr"))]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ReferenceDataConfig {
    /// Base address every lookup path is joined onto
    #[validate(url)]
    pub base_url: String,

    /// Per-request timeout for reference data calls
    #[validate(range(min = 1, max = 300))]
    pub timeout_secs: u64,
}

impl Default for ReferenceDataConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ReferenceDataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_expiration_order"))]
pub struct CacheConfig {
    #[validate(range(min = 1))]
    pub sliding_expiration_secs: u64,

    #[validate(range(min = 1))]
    pub absolute_expiration_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sliding_expiration_secs: 30 * 60,
            absolute_expiration_secs: 60 * 60,
        }
    }
}

impl CacheConfig {
    pub fn expiration_policy(&self) -> ExpirationPolicy {
        ExpirationPolicy::new(
            Duration::from_secs(self.sliding_expiration_secs),
            Duration::from_secs(self.absolute_expiration_secs),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn validate_socket_addr(value: &str) -> Result<(), validator::ValidationError> {
    value.parse::<SocketAddr>().map(|_| ()).map_err(|_| {
        validator::ValidationError::new("socket_addr")
            .with_message(format!("`{value}` is not a socket address").into())
    })
}

fn validate_expiration_order(cache: &CacheConfig) -> Result<(), validator::ValidationError> {
    if cache.sliding_expiration_secs > cache.absolute_expiration_secs {
        return Err(validator::ValidationError::new("expiration_order").with_message(
            "sliding expiration must not exceed absolute expiration".into(),
        ));
    }
    Ok(())
}

impl ServiceConfig {
    /// Load configuration from a YAML file, then apply environment overrides
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate().map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from a YAML string, without environment overrides
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise defaults plus environment overrides
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_yaml_file(path);
        }

        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate().map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Replace values with any overrides `lookup` returns for the known keys
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup(ENV_LISTEN_ADDR) {
            self.server.listen_addr = addr;
        }
        if let Some(url) = lookup(ENV_REFERENCE_DATA_URL) {
            self.reference_data.base_url = url;
        }
    }

    /// Parsed listen address; only fails on configs that skipped validation
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .listen_addr
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                message: format!("invalid listen address `{}`", self.server.listen_addr),
            })
    }

    pub fn expiration_policy(&self) -> ExpirationPolicy {
        self.cache.expiration_policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.reference_data.timeout_secs, 30);
        assert_eq!(config.expiration_policy(), ExpirationPolicy::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_str_partial() {
        let yaml = r#"
reference_data:
  base_url: http://reference-data:3000/api/
cache:
  sliding_expiration_secs: 60
"#;
        let config = ServiceConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.reference_data.base_url, "http://reference-data:3000/api/");
        assert_eq!(config.reference_data.timeout_secs, 30);
        assert_eq!(config.cache.sliding_expiration_secs, 60);
        assert_eq!(config.cache.absolute_expiration_secs, 3600);
    }

    #[test]
    fn test_rejects_sliding_longer_than_absolute() {
        let yaml = r#"
cache:
  sliding_expiration_secs: 7200
  absolute_expiration_secs: 3600
"#;
        let err = ServiceConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ServiceConfig::from_yaml_str("reference_data:\n  base_url: not a url\n").is_err());
        assert!(ServiceConfig::from_yaml_str("reference_data:\n  timeout_secs: 0\n").is_err());
        assert!(ServiceConfig::from_yaml_str("server:\n  listen_addr: localhost\n").is_err());
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = ServiceConfig::from_yaml_str("server: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_overrides() {
        let mut config = ServiceConfig::default();
        config.apply_overrides(|key| match key {
            ENV_LISTEN_ADDR => Some("0.0.0.0:9000".to_string()),
            ENV_REFERENCE_DATA_URL => Some("http://override/".to_string()),
            _ => None,
        });
        assert_eq!(config.listen_addr().unwrap().port(), 9000);
        assert_eq!(config.reference_data.base_url, "http://override/");
    }
}
