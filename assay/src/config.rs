use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Config file not found: {0}")]
    NotFound(String),
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub ner: NerConfig,
    pub log: LogConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NerConfig {
    /// Entity service endpoint; without it the fallback finds nothing.
    pub url: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "http://localhost:7474".to_string(),
            database: "neo4j".to_string(),
            user: "neo4j".to_string(),
            password: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LogConfig {
    /// Unrecognized levels fall back to `warn`.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level.parse().unwrap_or(Level::WARN)
    }
}

impl Config {
    /// `.assay/config.toml` in the current working directory.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(std::env::current_dir()?.join(".assay").join("config.toml"))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Loads `path`, or the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    /// Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env();
        Ok(config)
    }

    /// `ASSAY_*` variables override file values.
    pub fn apply_env(&mut self) {
        self.store.uri = envmnt::get_or("ASSAY_STORE_URI", &self.store.uri);
        self.store.database = envmnt::get_or("ASSAY_STORE_DATABASE", &self.store.database);
        self.store.user = envmnt::get_or("ASSAY_STORE_USER", &self.store.user);
        if envmnt::exists("ASSAY_STORE_PASSWORD") {
            self.store.password = Some(envmnt::get_or("ASSAY_STORE_PASSWORD", ""));
        }
        if envmnt::exists("ASSAY_NER_URL") {
            self.ner.url = Some(envmnt::get_or("ASSAY_NER_URL", ""));
        }
        self.log.level = envmnt::get_or("ASSAY_LOG_LEVEL", &self.log.level);
    }
}
