//! Error types for the document scanner

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a scan
#[derive(Error, Debug)]
pub enum ScanError {
    /// A path given on the command line does not exist
    #[error("No such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    /// A document or baseline could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A rule pattern does not compile
    #[error("Rule {rule}: invalid pattern: {source}")]
    InvalidPattern {
        /// Rule id
        rule: String,
        /// Underlying error
        #[source]
        source: regex::Error,
    },

    /// A rule definition is unusable
    #[error("Rule {rule}: {reason}")]
    InvalidRule {
        /// Rule id
        rule: String,
        /// What is wrong
        reason: String,
    },

    /// Rule file could not be parsed
    #[error("Rule file error: {0}")]
    Rules(#[from] toml::de::Error),

    /// Baseline file could not be parsed or written
    #[error("Baseline error: {0}")]
    Baseline(#[from] serde_json::Error),
}

impl ScanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;
