//! Error types for the Tuner

use thiserror::Error;

/// Errors that can occur while loading or applying parameter overrides
#[derive(Error, Debug)]
pub enum TunerError {
    /// Override file could not be parsed
    #[error("Failed to parse overrides: {0}")]
    Parse(String),

    /// An override value is outside its allowed range
    #[error("Invalid override for '{field}': {reason}")]
    InvalidOverride {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl From<toml::de::Error> for TunerError {
    fn from(e: toml::de::Error) -> Self {
        TunerError::Parse(e.to_string())
    }
}

/// Result type for tuner operations
pub type Result<T> = std::result::Result<T, TunerError>;
