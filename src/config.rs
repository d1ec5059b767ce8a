//! Configuration module for CORKBOARD.

use serde::Deserialize;
use std::path::Path;

use crate::{BoardError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/corkboard.db".to_string()
}

fn default_db_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_db_max_connections(),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret key used to sign session cookies.
    #[serde(default = "default_session_secret")]
    pub secret: String,
}

fn default_session_secret() -> String {
    "default_secret_key".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: default_session_secret(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Email address granted access to the admin panel.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/corkboard.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BoardError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BoardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CORKBOARD_PORT`: Override the listening port
    /// - `CORKBOARD_SESSION_SECRET`: Override the session signing secret
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("CORKBOARD_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(secret) = std::env::var("CORKBOARD_SESSION_SECRET") {
            if !secret.is_empty() {
                self.session.secret = secret;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the session secret or admin email is empty.
    pub fn validate(&self) -> Result<()> {
        if self.session.secret.is_empty() {
            return Err(BoardError::Config(
                "session secret is empty. \
                 Set it in config.toml or via CORKBOARD_SESSION_SECRET."
                    .to_string(),
            ));
        }
        if self.auth.admin_email.is_empty() {
            return Err(BoardError::Config("admin_email is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);

        assert_eq!(config.database.path, "data/corkboard.db");
        assert_eq!(config.database.max_connections, 5);

        assert_eq!(config.session.secret, "default_secret_key");
        assert_eq!(config.auth.admin_email, "admin@example.com");

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/corkboard.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
path = "custom/board.sqlite"
max_connections = 10

[session]
secret = "super-secret"

[auth]
admin_email = "sysop@example.net"

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);

        assert_eq!(config.database.path, "custom/board.sqlite");
        assert_eq!(config.database.max_connections, 10);

        assert_eq!(config.session.secret, "super-secret");
        assert_eq!(config.auth.admin_email, "sysop@example.net");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 4000
"#;

        let config = Config::parse(toml).unwrap();

        // Specified values
        assert_eq!(config.server.port, 4000);

        // Default values
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/corkboard.db");
        assert_eq!(config.auth.admin_email, "admin@example.com");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();

        // All defaults
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.session.secret, "default_secret_key");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(BoardError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(result.is_err());
        assert!(matches!(result, Err(BoardError::Io(_))));
    }

    #[test]
    fn test_apply_env_overrides() {
        // One test covers all env cases; parallel tests must not race
        // on the same variables.
        let original_secret = std::env::var("CORKBOARD_SESSION_SECRET").ok();
        let original_port = std::env::var("CORKBOARD_PORT").ok();

        std::env::set_var("CORKBOARD_SESSION_SECRET", "env-secret-key");
        std::env::set_var("CORKBOARD_PORT", "9000");

        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.session.secret, "env-secret-key");
        assert_eq!(config.server.port, 9000);

        // An empty secret does not override
        std::env::set_var("CORKBOARD_SESSION_SECRET", "");
        let mut config = Config::default();
        config.session.secret = "original-secret".to_string();
        config.apply_env_overrides();
        assert_eq!(config.session.secret, "original-secret");

        // An unparseable port is ignored
        std::env::set_var("CORKBOARD_PORT", "not-a-port");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.server.port, 3000);

        match original_secret {
            Some(val) => std::env::set_var("CORKBOARD_SESSION_SECRET", val),
            None => std::env::remove_var("CORKBOARD_SESSION_SECRET"),
        }
        match original_port {
            Some(val) => std::env::set_var("CORKBOARD_PORT", val),
            None => std::env::remove_var("CORKBOARD_PORT"),
        }
    }

    #[test]
    fn test_validate_empty_secret() {
        let mut config = Config::default();
        config.session.secret = String::new();

        let result = config.validate();
        assert!(result.is_err());
        if let Err(BoardError::Config(msg)) = result {
            assert!(msg.contains("session secret"));
        }
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_ok());
    }
}
