//! Configuration for modclash.
//!
//! Loaded from a TOML file. Every section has defaults, so an empty file (or
//! no file at all) is a valid configuration. The game user directory is left
//! unset by default; front ends derive it from the platform's documents
//! directory and pass it in explicitly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::conflict::{ReportFormat, DESCRIPTOR_PATH};
use crate::errors::ConfigError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the game keeps settings and mod descriptors.
    #[serde(default)]
    pub game: GameConfig,

    /// Report output settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// Game user directory layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Game user directory, e.g. `~/Documents/Paradox Interactive/Stellaris`.
    #[serde(default)]
    pub user_dir: Option<PathBuf>,

    /// Settings file, relative to `user_dir`.
    #[serde(default = "default_settings_file")]
    pub settings_file: String,

    /// Key of the block listing enabled mod descriptors.
    #[serde(default = "default_mod_list_key")]
    pub mod_list_key: String,
}

fn default_settings_file() -> String {
    "settings.txt".into()
}

fn default_mod_list_key() -> String {
    "last_mods".into()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            user_dir: None,
            settings_file: default_settings_file(),
            mod_list_key: default_mod_list_key(),
        }
    }
}

impl GameConfig {
    /// Absolute location of the settings file under `user_dir`.
    pub fn settings_path(&self, user_dir: &Path) -> PathBuf {
        user_dir.join(&self.settings_file)
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Where and how to write the conflict report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report file path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// `text` or `json`.
    #[serde(default)]
    pub format: ReportFormat,

    /// Normalized path ignored when intersecting mod file sets.
    #[serde(default = "default_excluded_path")]
    pub excluded_path: String,
}

fn default_output() -> PathBuf {
    PathBuf::from("dump.txt")
}

fn default_excluded_path() -> String {
    DESCRIPTOR_PATH.into()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            format: ReportFormat::default(),
            excluded_path: default_excluded_path(),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum tracing level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Load an [`AppConfig`] from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;

        debug!("configuration parsed successfully");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate that all fields are present and sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.settings_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "game.settings_file".into(),
                detail: "settings file must not be empty".into(),
            });
        }
        if self.game.mod_list_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "game.mod_list_key".into(),
                detail: "mod list key must not be empty".into(),
            });
        }
        if !self.report.excluded_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "report.excluded_path".into(),
                detail: "excluded path must be normalized and start with '/'".into(),
            });
        }
        if self.report.excluded_path.chars().any(|c| c == '\\' || c.is_uppercase()) {
            return Err(ConfigError::InvalidValue {
                field: "report.excluded_path".into(),
                detail: "excluded path must be lower-case with '/' separators".into(),
            });
        }
        if self.report.output.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.output".into(),
                detail: "report output path must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Convenience: load and validate in one call.
    pub fn load_and_validate<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// The configured user directory, or `fallback` when none is set.
    pub fn user_dir_or(&self, fallback: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        self.game
            .user_dir
            .clone()
            .or(fallback)
            .ok_or(ConfigError::UserDirUnavailable)
    }

    /// Generate a default TOML config template string.
    pub fn default_template() -> &'static str {
        r#"# modclash configuration

[game]
# user_dir = "~/Documents/Paradox Interactive/Stellaris"  # auto-detected
settings_file = "settings.txt"
mod_list_key = "last_mods"

[report]
output = "dump.txt"
format = "text"   # text | json
excluded_path = "/descriptor.mod"

[logging]
level = "warn"
"#
    }
}
