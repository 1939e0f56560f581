//! Server configuration with layered overrides.
//!
//! Values are resolved in three tiers, later tiers winning:
//! 1. TOML file (or built-in defaults when no file exists)
//! 2. Environment variables
//! 3. Explicit overrides from the command line

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "PORTFOLIO_CONFIG_PATH";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "portfolio.toml";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to read config file `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Complete process configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub server: ServerSection,
    pub logging: LoggingSection,
    pub contact: ContactSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Built site to serve; skipped when the directory does not exist.
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    /// Absolute directory for rotating log files; `None` logs to stderr.
    pub dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactSection {
    /// Address used when composing static-mode `mailto:` links.
    pub recipient: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: Some(PathBuf::from("dist")),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: portfolio_core::default_log_level().to_string(),
            dir: None,
        }
    }
}

impl Default for ContactSection {
    fn default() -> Self {
        Self {
            recipient: "hello@example.com".to_string(),
        }
    }
}

/// Command-line overrides; `None` leaves the lower tier untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
}

impl PortfolioConfig {
    /// Parses a TOML document; missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Supported variables:
    /// - `PORT` -> `server.port`
    /// - `PORTFOLIO_HOST` -> `server.host`
    /// - `PORTFOLIO_STATIC_DIR` -> `server.static_dir`
    /// - `PORTFOLIO_LOG_LEVEL` -> `logging.level`
    /// - `PORTFOLIO_LOG_DIR` -> `logging.dir`
    /// - `PORTFOLIO_CONTACT_RECIPIENT` -> `contact.recipient`
    pub fn apply_env_with<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("PORT") {
            self.server.port = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value })?;
        }
        if let Some(value) = lookup("PORTFOLIO_HOST") {
            self.server.host = value;
        }
        if let Some(value) = lookup("PORTFOLIO_STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("PORTFOLIO_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = lookup("PORTFOLIO_LOG_DIR") {
            self.logging.dir = Some(value);
        }
        if let Some(value) = lookup("PORTFOLIO_CONTACT_RECIPIENT") {
            self.contact.recipient = value;
        }
        Ok(())
    }

    /// Applies command-line overrides.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(host) = &overrides.host {
            self.server.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(dir) = &overrides.static_dir {
            self.server.static_dir = Some(dir.clone());
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level = level.clone();
        }
        if let Some(dir) = &overrides.log_dir {
            self.logging.dir = Some(dir.clone());
        }
    }

    /// Checks values the loaders cannot reject on their own.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host cannot be empty".to_string()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".to_string()));
        }
        if let Some(dir) = &self.logging.dir {
            if !Path::new(dir).is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "logging.dir must be an absolute path, got `{dir}`"
                )));
            }
        }
        if !portfolio_core::is_valid_email(&self.contact.recipient) {
            return Err(ConfigError::InvalidValue {
                key: "contact.recipient",
                value: self.contact.recipient.clone(),
            });
        }
        Ok(())
    }
}

/// Locates the config file.
///
/// Search order:
/// 1. `PORTFOLIO_CONFIG_PATH` (must exist when set)
/// 2. `./portfolio.toml`
///
/// Returns `Ok(None)` when neither is present.
pub fn find_config_file() -> ConfigResult<Option<PathBuf>> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path));
        }
        return Ok(Some(path));
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    Ok(local.exists().then_some(local))
}

/// Loads configuration from all three tiers and validates the result.
///
/// `config_path` wins over the search in `find_config_file`.
pub fn load_config(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> ConfigResult<PortfolioConfig> {
    let config_file = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file()?,
    };

    let mut config = match config_file {
        Some(path) => {
            let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            PortfolioConfig::from_toml_str(&content)?
        }
        None => PortfolioConfig::default(),
    };

    config.apply_env_with(|key| env::var(key).ok())?;
    config.apply_overrides(overrides);
    config.validate()?;
    Ok(config)
}
