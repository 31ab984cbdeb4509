use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::rewrite::RewriteConfig;
use super::server::ServerConfig;

/// Main configuration structure for Ferrous Rewrite
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Zones, prefixes and TTL policy
    #[serde(default)]
    pub rewrite: RewriteConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-rewrite.toml in current directory
    /// 3. /etc/ferrous-rewrite/config.toml
    /// 4. Default configuration
    ///
    /// Command-line and environment overrides are applied on top.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(zones) = overrides.zones {
            self.rewrite.set_zones_from_list(&zones);
        }
        if let Some(prefix) = overrides.default_prefix {
            self.rewrite.default_prefix = prefix;
        }
        if let Some(ttl) = overrides.negative_ttl {
            self.rewrite.negative_ttl = ttl;
        }
        if let Some(ttl) = overrides.answer_ttl {
            self.rewrite.answer_ttl = ttl;
        }
        if let Some(timeout) = overrides.upstream_timeout_ms {
            self.rewrite.upstream_timeout_ms = timeout;
        }
        if let Some(listen) = overrides.listen_address {
            self.server.listen_address = listen;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.listen_socket_addr()?;

        if self.rewrite.upstream_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }

        if self.rewrite.zones.is_empty() {
            return Err(ConfigError::Validation(
                "No zones configured (set ZONES or rewrite.zones)".to_string(),
            ));
        }

        self.rewrite.zone_table()?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("ferrous-rewrite.toml").exists() {
            Some("ferrous-rewrite.toml".to_string())
        } else if std::path::Path::new("/etc/ferrous-rewrite/config.toml").exists() {
            Some("/etc/ferrous-rewrite/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub zones: Option<String>,
    pub default_prefix: Option<String>,
    pub negative_ttl: Option<u32>,
    pub answer_ttl: Option<u32>,
    pub upstream_timeout_ms: Option<u64>,
    pub listen_address: Option<String>,
    pub log_level: Option<String>,
}
