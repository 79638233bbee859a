//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `minizoo.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;
use std::str::FromStr;

use minizoo_domain::id::IdFormat;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Storage backend settings.
    pub storage: StorageConfig,
    /// Identifier generation settings.
    pub ids: IdsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Which repository implementation backs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One pretty-printed JSON document on disk.
    #[default]
    Json,
    /// `SQLite` database through sqlx.
    Sqlite,
    /// Process memory only.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Validation(format!(
                "unknown storage backend {s:?}, expected json, sqlite or memory"
            ))),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Selected backend.
    pub backend: StorageBackend,
    /// Runtime environment name, used to pick the default JSON document.
    pub environment: String,
    /// Explicit JSON document path; overrides the per-environment default.
    pub path: Option<PathBuf>,
    /// `SQLite` connection URL, used by the `sqlite` backend.
    pub database_url: String,
}

/// Identifier generation configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IdsConfig {
    /// `uuid` or `legacy`.
    pub format: IdFormat,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `minizoo.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if an
    /// override or the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("minizoo.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("MINIZOO_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("MINIZOO_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("MINIZOO_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = lookup("MINIZOO_STORAGE") {
            self.storage.backend = val.parse()?;
        }
        if let Some(val) = lookup("MINIZOO_ENV") {
            self.storage.environment = val;
        }
        if let Some(val) = lookup("MINIZOO_DATA_PATH") {
            self.storage.path = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("MINIZOO_DATABASE_URL") {
            self.storage.database_url = val;
        }
        if let Some(val) = lookup("MINIZOO_ID_FORMAT") {
            self.ids.format = val
                .parse()
                .map_err(|err: minizoo_domain::id::UnknownIdFormat| {
                    ConfigError::Validation(err.to_string())
                })?;
        }
        if let Some(val) = lookup("MINIZOO_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.storage.environment.is_empty() {
            return Err(ConfigError::Validation(
                "storage environment must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the JSON document path for the `json` backend.
    ///
    /// Defaults to `data/database.<environment>.json`.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.storage.path.clone().unwrap_or_else(|| {
            PathBuf::from(format!("data/database.{}.json", self.storage.environment))
        })
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.storage.database_url
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            environment: "development".to_string(),
            path: None,
            database_url: "sqlite:minizoo.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "minizood=info,minizoo=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
