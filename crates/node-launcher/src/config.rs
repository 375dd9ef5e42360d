//! # Launcher Configuration
//!
//! Layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config <path>`)
//! 3. Environment (`CHAIN_TESTNET`, `CHAIN_REGTEST`, `CHAIN_NETWORK`, `CHAIN_LOG`)
//! 4. Command-line flags
//!
//! Network intents only ever switch on when layered; a later layer cannot
//! clear an earlier `true`. Conflicts are left for selection to report.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable for the public test network intent.
pub const ENV_TESTNET: &str = "CHAIN_TESTNET";
/// Environment variable for the regression test network intent.
pub const ENV_REGTEST: &str = "CHAIN_REGTEST";
/// Environment variable naming a network (`main`, `test`, `regtest`).
pub const ENV_NETWORK: &str = "CHAIN_NETWORK";
/// Environment variable for the log level.
pub const ENV_LOG: &str = "CHAIN_LOG";

/// Complete launcher configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeConfig {
    /// Network selection.
    pub network: NetworkSection,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Network selection intents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkSection {
    /// Use the public test network.
    pub testnet: bool,
    /// Use the regression test network.
    pub regtest: bool,
    /// Network by name; exclusive with the two flags above.
    pub name: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`NodeConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Environment variable holds something other than a boolean.
    #[error("environment variable {key} must be a boolean, got '{value}'")]
    InvalidBool { key: &'static str, value: String },
}

impl NodeConfig {
    /// Parse TOML text.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Layer process environment on top.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Layer an arbitrary variable lookup on top.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_TESTNET) {
            self.network.testnet |= parse_bool(ENV_TESTNET, &value)?;
        }
        if let Some(value) = lookup(ENV_REGTEST) {
            self.network.regtest |= parse_bool(ENV_REGTEST, &value)?;
        }
        if let Some(name) = lookup(ENV_NETWORK).filter(|v| !v.trim().is_empty()) {
            self.network.name = Some(name);
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.logging.level = level;
        }
        Ok(())
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert!(!config.network.testnet);
        assert!(!config.network.regtest);
        assert_eq!(config.network.name, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_toml_sections() {
        let text = r#"
            [network]
            regtest = true

            [logging]
            level = "debug"
        "#;
        let config = NodeConfig::from_toml_str(text, Path::new("node.toml")).unwrap();
        assert!(config.network.regtest);
        assert!(!config.network.testnet);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let text = "[network]\nsignet = true\n";
        let err = NodeConfig::from_toml_str(text, Path::new("node.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_switches_on_but_never_off() {
        let mut config = NodeConfig::default();
        config.network.testnet = true;

        config
            .apply_env_with(env(&[(ENV_TESTNET, "0"), (ENV_REGTEST, "yes")]))
            .unwrap();

        assert!(config.network.testnet);
        assert!(config.network.regtest);
    }

    #[test]
    fn test_env_network_and_log() {
        let mut config = NodeConfig::default();
        config
            .apply_env_with(env(&[(ENV_NETWORK, "regtest"), (ENV_LOG, "trace")]))
            .unwrap();
        assert_eq!(config.network.name.as_deref(), Some("regtest"));
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_env_rejects_non_boolean() {
        let mut config = NodeConfig::default();
        let err = config
            .apply_env_with(env(&[(ENV_REGTEST, "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_REGTEST));
    }
}
