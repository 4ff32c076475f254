//! Error types for model selection
//!
//! Input-format and configuration errors are fatal for a run: the caller
//! reports them and stops before printing any partial selection.

use thiserror::Error;

/// Errors that can occur while reading scores or selecting a model
#[derive(Error, Debug)]
pub enum ModelTestError {
    #[error("Input file is incomplete or incorrect: {0}")]
    InputFormat(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Unknown substitution model: {0}")]
    UnknownModel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, ModelTestError>;
