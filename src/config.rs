use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;

use crate::error::ConfigError;
use crate::game::COLS;

/// Where and how the current game is saved.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub save_dir: PathBuf,
    /// Storage key; the game is saved to `<save_dir>/<key>.json`.
    pub key: String,
    /// Save after every accepted move.
    pub autosave: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            save_dir: PathBuf::from(".connect-four"),
            key: "connectFourGameState".to_string(),
            autosave: true,
        }
    }
}

/// Terminal UI timing and layout.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Time per row of a falling piece.
    pub drop_frame_ms: u64,
    /// Input poll interval while idle.
    pub tick_ms: u64,
    pub start_column: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            drop_frame_ms: 60,
            tick_ms: 100,
            start_column: 3,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: PathBuf,
    /// One of off, error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: PathBuf::from("connect-four.log"),
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.level).map_err(|_| {
            ConfigError::Validation(format!(
                "logging.level '{}' is not one of off, error, warn, info, debug, trace",
                self.level
            ))
        })
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist. Logging is usually not set up yet, so reporting the
    /// fallback is left to the caller.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage.key must not be empty".into(),
            ));
        }
        if self
            .storage
            .key
            .contains(|c: char| c == '/' || c == '\\' || c == '.')
        {
            return Err(ConfigError::Validation(
                "storage.key must not contain path separators or dots".into(),
            ));
        }
        if self.ui.drop_frame_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.drop_frame_ms must be > 0".into(),
            ));
        }
        if self.ui.tick_ms == 0 {
            return Err(ConfigError::Validation("ui.tick_ms must be > 0".into()));
        }
        if self.ui.start_column >= COLS {
            return Err(ConfigError::Validation(format!(
                "ui.start_column must be < {COLS}"
            )));
        }
        self.logging.level_filter()?;

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
