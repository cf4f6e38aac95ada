//! Configuration file for the command-line front end.
//!
//! ```toml
//! address = "203.0.113.7:8888"
//! password = "secret"
//!
//! [transport]
//! recv_buffer_size = 65536
//! read_timeout = { secs = 10, nanos = 0 }
//! ```

use std::path::{Path, PathBuf};

use isle_rcon::prelude::TransportConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Connection settings. Command-line flags override every field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server RCON address, `host:port`.
    pub address: Option<String>,
    pub password: Option<String>,
    pub transport: TransportConfig,
}

impl Config {
    /// Loads a config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Applies command-line overrides.
    pub fn merge(mut self, address: Option<String>, password: Option<String>) -> Self {
        if address.is_some() {
            self.address = address;
        }
        if password.is_some() {
            self.password = password;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config: Config = toml::from_str(
            r#"
            address = "127.0.0.1:8888"
            password = "pw"

            [transport]
            recv_buffer_size = 4096
            "#,
        )
        .unwrap();
        assert_eq!(config.address.as_deref(), Some("127.0.0.1:8888"));
        assert_eq!(config.password.as_deref(), Some("pw"));
        assert_eq!(config.transport.recv_buffer_size, 4096);
        assert_eq!(config.transport.read_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config {
            address: Some("file:1".into()),
            password: Some("file-pw".into()),
            ..Config::default()
        }
        .merge(Some("flag:2".into()), None);
        assert_eq!(config.address.as_deref(), Some("flag:2"));
        assert_eq!(config.password.as_deref(), Some("file-pw"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/isle-rcon.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
