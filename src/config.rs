use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Replace the value when a later layer supplies one.
    fn overlay(&mut self, value: Option<T>, source: ConfigSource) {
        if let Some(value) = value {
            *self = Self::new(value, source);
        }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the persisted shopping lists
    pub data_dir: ConfigValue<PathBuf>,
    /// Currency prefix used when printing totals
    pub currency: ConfigValue<String>,
    /// Default log filter when RUST_LOG is not set
    pub log_level: ConfigValue<String>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// On-disk shape of the YAML file; every key is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    currency: Option<String>,
    log_level: Option<String>,
}

impl ConfigFile {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError(path.into(), e))?;
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::ParseError(path.into(), e))
    }
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path.unwrap_or_else(Self::default_config_path);
        let mut config = Self {
            data_dir: ConfigValue::new(Self::default_data_dir(), ConfigSource::Default),
            currency: ConfigValue::new("R$".to_string(), ConfigSource::Default),
            log_level: ConfigValue::new("warn".to_string(), ConfigSource::Default),
            config_file: None,
        };

        if path.exists() {
            let file = ConfigFile::read(&path)?;
            // Relative data_dir is taken from the config file's directory
            let data_dir = file.data_dir.map(|dir| match path.parent() {
                Some(parent) if dir.is_relative() => parent.join(dir),
                _ => dir,
            });

            config.data_dir.overlay(data_dir, ConfigSource::File);
            config.currency.overlay(file.currency, ConfigSource::File);
            config.log_level.overlay(file.log_level, ConfigSource::File);
            config.config_file = Some(path);
        }

        config.data_dir.overlay(
            env_value("SHOPLIST_DATA_DIR").map(PathBuf::from),
            ConfigSource::Environment,
        );
        config
            .currency
            .overlay(env_value("SHOPLIST_CURRENCY"), ConfigSource::Environment);
        config
            .log_level
            .overlay(env_value("SHOPLIST_LOG_LEVEL"), ConfigSource::Environment);

        Ok(config)
    }

    /// Name, printable value and source of every setting, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String, &ConfigSource)> {
        vec![
            (
                "data_dir",
                self.data_dir.value.display().to_string(),
                &self.data_dir.source,
            ),
            ("currency", self.currency.value.clone(), &self.currency.source),
            ("log_level", self.log_level.value.clone(), &self.log_level.source),
        ]
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/shoplist/
    /// - macOS: ~/Library/Application Support/shoplist/
    /// - Windows: %APPDATA%/shoplist/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shoplist")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/shoplist/
    /// - macOS: ~/Library/Application Support/shoplist/
    /// - Windows: %APPDATA%/shoplist/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shoplist")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
