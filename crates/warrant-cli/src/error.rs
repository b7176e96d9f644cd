//! Error types for the CLI application.

use thiserror::Error;
use warrant_pipeline::PipelineError;
use warrant_scanner::ScanError;
use warrant_tuner::TunerError;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The review could not run
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// The document scan could not run
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Bad override value
    #[error("Override error: {0}")]
    Overrides(#[from] TunerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
