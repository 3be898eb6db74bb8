//! Core error types for organizer-core.
//!
//! The scheduling engine itself never fails: malformed task data is
//! normalized to safe defaults. Errors only surface at the edges, when
//! configuration is read or written, or when a capacity table or date
//! supplied by the user is validated.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for organizer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Capacity table does not have one entry per weekday
    #[error("Capacity table must have 7 entries (Monday..Sunday), got {len}")]
    CapacityLength { len: usize },

    /// Capacity entry is not a finite number
    #[error("Invalid capacity for {weekday}: {value}")]
    InvalidCapacity { weekday: chrono::Weekday, value: f64 },

    /// Date string could not be parsed
    #[error("Invalid date '{input}': expected YYYY-MM-DD or RFC 3339")]
    InvalidDate { input: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
