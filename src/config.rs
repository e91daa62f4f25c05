//! Configuration module
//!
//! TOML file (default `~/.config/crz-traffic/config.toml`, overridable via
//! `CRZ_CONFIG`), with every section falling back to a sensible default.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file path. Its existence decides whether the startup CSV
    /// ingest runs.
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "./traffic.db".to_string(),
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// CSV file loaded once when the database file does not exist yet.
    pub csv_path: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            csv_path: "./cleaned_data.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter directive (e.g. "info", "crz_traffic=debug").
    pub level: String,
    /// "text" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub ingest: IngestConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Default config location: `<config dir>/crz-traffic/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crz-traffic")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.database.path, "./traffic.db");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9001

            [ingest]
            csv_path = "/data/canonical.csv"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.ingest.csv_path, "/data/canonical.csv");
        assert_eq!(cfg.database.connection_url(), "sqlite://./traffic.db?mode=rwc");
    }
}
