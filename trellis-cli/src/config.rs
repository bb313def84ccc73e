//! Layered configuration
//!
//! Values are resolved lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. `trellis.toml`, `trellis.yaml`, `trellis.json` in the working directory
//! 3. `TRELLIS_*` environment variables (`TRELLIS_DATA_DIR`, `TRELLIS_ACTOR`, ...)
//! 4. Command-line flags

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Base name of the configuration files
pub const CONFIG_FILE_STEM: &str = "trellis";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "TRELLIS_";

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration parsing failed
    #[error("Failed to parse configuration: {source}")]
    ParseError { source: figment::Error },

    /// Invalid configuration value
    #[error("Invalid configuration value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError { source: error }
    }
}

/// Where board data lives and who changes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrellisConfig {
    /// Directory holding every data file
    pub data_dir: PathBuf,
    /// Model document, relative to `data_dir`
    pub board_file: PathBuf,
    /// Archive of deleted tasks, relative to `data_dir`
    pub archive_file: PathBuf,
    /// Activity log, relative to `data_dir`
    pub activity_file: PathBuf,
    /// Name recorded in the activity log
    pub actor: Option<String>,
}

impl Default for TrellisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".trellis"),
            board_file: PathBuf::from("board.json"),
            archive_file: PathBuf::from("archive.jsonl"),
            activity_file: PathBuf::from("activity.jsonl"),
            actor: None,
        }
    }
}

impl TrellisConfig {
    /// Load from the current directory and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::InvalidValue {
            key: "data_dir".into(),
            message: format!("cannot read current directory: {e}"),
        })?;
        Self::load_from(&cwd)
    }

    /// Load with configuration files looked up in `dir`
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(dir).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment(dir: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(dir.join(format!("{CONFIG_FILE_STEM}.toml"))))
            .merge(Yaml::file(dir.join(format!("{CONFIG_FILE_STEM}.yaml"))))
            .merge(Json::file(dir.join(format!("{CONFIG_FILE_STEM}.json"))))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, actor: Option<String>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(actor) = actor {
            self.actor = Some(actor);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("data_dir", &self.data_dir),
            ("board_file", &self.board_file),
            ("archive_file", &self.archive_file),
            ("activity_file", &self.activity_file),
        ];
        for (key, path) in required {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: "must not be empty".into(),
                });
            }
        }
        if self.board_file == self.archive_file || self.board_file == self.activity_file {
            return Err(ConfigError::InvalidValue {
                key: "board_file".into(),
                message: "must differ from the archive and activity files".into(),
            });
        }
        Ok(())
    }

    pub fn board_path(&self) -> PathBuf {
        self.data_dir.join(&self.board_file)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join(&self.archive_file)
    }

    pub fn activity_path(&self) -> PathBuf {
        self.data_dir.join(&self.activity_file)
    }
}
