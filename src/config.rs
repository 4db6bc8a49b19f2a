use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TenderError};

/// Default directory name for tenderscan data.
const DATA_DIR: &str = ".tenderscan";
/// Keyword catalog and run history database filename.
const DB_FILE: &str = "catalog.db";
/// Config filename.
const CONFIG_FILE: &str = "config.toml";

/// Configuration resolved from a working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the data directory lives in.
    pub root: PathBuf,
    /// Path to the `.tenderscan/` directory.
    pub data_dir: PathBuf,
    /// Path to the `SQLite` database.
    pub db_path: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// User settings loaded from config.toml.
    pub settings: UserSettings,
}

/// User-configurable settings from .tenderscan/config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Output configuration.
    pub output: OutputSettings,
    /// Analysis configuration.
    pub analysis: AnalysisSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Output-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format: "checklist" (default), "json", or "pretty".
    pub format: String,
    /// Whether to colour keywords in checklist output.
    pub highlight: bool,
    /// Display truncation of sentences in characters (0 disables).
    pub truncate_chars: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "checklist".into(),
            highlight: true,
            truncate_chars: 200,
        }
    }
}

/// Analysis-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Whether each analysis is recorded in the run history.
    pub record_history: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            record_history: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter when `RUST_LOG` is not set.
    pub level: String,
    /// Log file (relative to the data directory). Logs go to stderr when unset.
    pub file: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            file: None,
        }
    }
}

impl Config {
    /// Create config for a given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data_dir = root.join(DATA_DIR);
        let db_path = data_dir.join(DB_FILE);
        let config_path = data_dir.join(CONFIG_FILE);

        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            root,
            data_dir,
            db_path,
            config_path,
            settings,
        }
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| TenderError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    /// Load settings from config.toml if it exists.
    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        toml::from_str(&content).ok()
    }

    /// Save current settings to config.toml.
    pub fn save_settings(&self) -> Result<()> {
        self.ensure_data_dir()?;
        let content = toml::to_string_pretty(&self.settings)
            .map_err(|e| TenderError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Ensure the `.tenderscan/` directory exists.
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Effective log file path, if file logging is configured.
    #[must_use]
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.settings
            .logging
            .file
            .as_ref()
            .map(|f| self.data_dir.join(f))
    }
}
