//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File this config was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,

    /// Problems met while loading, reported by [`Config::log_load`]
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file, created on first start
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_database_path() -> String {
    "database.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let mut config = Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("paybook").join("config.toml")),
            Some(PathBuf::from("/etc/paybook/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        let mut skipped = Vec::new();

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(mut config) => {
                        skipped.append(&mut config.warnings);
                        config.warnings = skipped;
                        return config;
                    }
                    Err(e) => skipped.push(e.to_string()),
                }
            }
        }

        let mut config = Self::from_env();
        skipped.append(&mut config.warnings);
        config.warnings = skipped;
        config
    }

    /// Report where the config came from and anything skipped while loading.
    ///
    /// Loading happens before the subscriber exists, so binaries call this
    /// right after `logging::init`.
    pub fn log_load(&self) {
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
        for warning in &self.warnings {
            tracing::warn!("{}", warning);
        }
    }

    /// Explicit file if given, otherwise the default lookup
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("PAYBOOK_DATABASE") {
            self.storage.database_path = path;
        }

        if let Some(host) = lookup("PAYBOOK_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PAYBOOK_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => self
                    .warnings
                    .push(format!("Ignoring invalid PAYBOOK_PORT value {:?}", port)),
            }
        }

        if let Some(level) = lookup("PAYBOOK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PAYBOOK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Paybook Configuration
#
# Environment variables override these settings:
# - PAYBOOK_DATABASE
# - PAYBOOK_HOST
# - PAYBOOK_PORT
# - PAYBOOK_LOG_LEVEL
# - PAYBOOK_LOG_FORMAT

[storage]
# SQLite database file (created and seeded on first start)
database_path = "database.db"

[server]
# Web front end host
host = "127.0.0.1"

# Web front end port
port = 5000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/paybook/paybook.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage.database_path, "database.db");
        assert_eq!(config.server.addr(), "127.0.0.1:5000");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.storage.database_path, "database.db");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse("[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.database_path, "database.db");
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PAYBOOK_DATABASE", "/tmp/paybook.db"),
            ("PAYBOOK_PORT", "9000"),
            ("PAYBOOK_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.database_path, "/tmp/paybook.db");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "PAYBOOK_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 5000);
        assert_eq!(
            config.warnings,
            vec!["Ignoring invalid PAYBOOK_PORT value \"not-a-port\"".to_string()]
        );
    }

    #[test]
    fn test_load_records_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\ndatabase_path = \"pay.db\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert_eq!(config.storage.database_path, "pay.db");
        assert!(config.warnings.is_empty());

        assert!(Config::default().source.is_none());
    }
}
