//! Error types for the modclash core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them all for callers that want a
//! single error type.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Mod(#[from] ModError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors from reading script input.
///
/// The lenient entry points never return these for malformed text; they are
/// surfaced by [`crate::script::parse_strict`] and by the file/reader helpers.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A block body stopped consuming input before reaching `}` or the end.
    #[error("parser stalled at offset {offset} on unexpected '{found}'")]
    Stalled { offset: usize, found: char },

    /// A block opened deeper than the parser's nesting limit.
    #[error("blocks nested deeper than {max_depth} at offset {offset}")]
    TooDeep { offset: usize, max_depth: usize },

    /// The script file could not be read.
    #[error("failed to read script '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic I/O wrapper for reader input.
    #[error("script I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Mod errors
// ---------------------------------------------------------------------------

/// Errors from resolving a mod descriptor into a file set.
#[derive(Debug, Error)]
pub enum ModError {
    /// The descriptor has neither a `path` nor an `archive` entry.
    #[error("mod descriptor '{descriptor}' has neither a path nor an archive")]
    MissingSource { descriptor: String },

    /// A required descriptor field is absent or empty.
    #[error("mod descriptor '{descriptor}' is missing required field '{field}'")]
    MissingField { descriptor: String, field: String },

    /// The settings file has no mod list under the configured key.
    #[error("settings file has no '{key}' block")]
    MissingModList { key: String },

    /// The descriptor file could not be parsed or read.
    #[error("mod descriptor '{descriptor}': {source}")]
    Descriptor {
        descriptor: String,
        #[source]
        source: ParseError,
    },

    /// Walking a mod directory failed.
    #[error("failed to enumerate mod directory '{path}': {detail}")]
    Walk { path: PathBuf, detail: String },

    /// Opening or reading a mod archive failed.
    #[error("failed to read mod archive '{path}': {detail}")]
    Archive { path: PathBuf, detail: String },

    /// Generic I/O wrapper.
    #[error("mod I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue { field: String, detail: String },

    /// No user directory was configured and none could be derived.
    #[error("game user directory is not configured and no documents directory was found")]
    UserDirUnavailable,

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

/// Errors from writing a conflict report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report file could not be created or written.
    #[error("failed to write report '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failure.
    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic I/O wrapper.
    #[error("report I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
