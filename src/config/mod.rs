//! Configuration loading and validation.
//!
//! Values come from an optional TOML file, then `PICKLEBALL_*` environment
//! variables (nested keys use `__`, e.g. `PICKLEBALL_SERVER__PORT=9000`).
//! Command-line flags are applied on top by the binary.
//!
//! ```toml
//! data_dir = "/var/lib/pickleball"
//! log_level = "info"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//! cors_origin = "https://scores.example.com"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const ENV_PREFIX: &str = "PICKLEBALL";

/// `PICKLEBALL_` prefix, `__` between nested keys.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origin, `*` for any
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origin: "*".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `players.jsonl` and `matches.jsonl`
    pub data_dir: PathBuf,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,

    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            log_level: "info".to_string(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load `path` if it exists, overlay the environment, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(path, environment())
    }

    fn load_with(path: &Path, env: config::Environment) -> Result<Self, ConfigError> {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let problem = if self.data_dir.as_os_str().is_empty() {
            Some("data_dir must not be empty")
        } else if self.server.host.trim().is_empty() {
            Some("server.host must not be empty")
        } else if self.server.port == 0 {
            Some("server.port must be between 1 and 65535")
        } else {
            None
        };

        match problem {
            Some(msg) => Err(ConfigError::ValidationError(msg.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("pickleball.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.server.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.server.cors_origin, "*");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let mut no_port = AppConfig::default();
        no_port.server.port = 0;

        let mut no_host = AppConfig::default();
        no_host.server.host = " ".to_string();

        let mut no_dir = AppConfig::default();
        no_dir.data_dir = PathBuf::new();

        for config in [no_port, no_host, no_dir] {
            assert!(matches!(
                config.validate(),
                Err(ConfigError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = AppConfig::load(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
data_dir = "/var/lib/pickleball"

[server]
port = 8088
"#,
        );

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/pickleball"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    fn env_vars(pairs: &[(&str, &str)]) -> config::Environment {
        environment().source(Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[server]\nport = 8088\nhost = \"0.0.0.0\"\n");
        let env = env_vars(&[
            ("PICKLEBALL_SERVER__PORT", "9123"),
            ("PICKLEBALL_DATA_DIR", "/srv/pickleball"),
            ("OTHER_SERVER__PORT", "1"),
        ]);

        let config = AppConfig::load_with(&path, env).unwrap();

        assert_eq!(config.server.port, 9123);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.data_dir, PathBuf::from("/srv/pickleball"));
    }

    #[test]
    fn test_env_invalid_port_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_vars(&[("PICKLEBALL_SERVER__PORT", "0")]);

        assert!(matches!(
            AppConfig::load_with(&dir.path().join("none.toml"), env),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_file_with_invalid_port_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[server]\nport = 0\n");

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[server\nport = ");

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_written_config_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.log_level = "pickleball_stats=debug".to_string();
        config.server.cors_origin = "http://localhost:5173".to_string();

        let path = write_config(&dir, &toml::to_string(&config).unwrap());

        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }
}
