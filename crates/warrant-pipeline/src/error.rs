//! Error types for the pipeline

use thiserror::Error;
use warrant_domain::{DomainError, Stage};
use warrant_tuner::TunerError;

/// Errors that stop a run before or during the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input fails a structural check
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A value would violate a domain invariant
    #[error("Rejected: {0}")]
    Rejected(#[from] DomainError),

    /// Parameter overrides could not be used
    #[error("Override error: {0}")]
    Overrides(#[from] TunerError),

    /// A record was requested before a required stage ran
    #[error("Run incomplete: {0} has not run")]
    Incomplete(Stage),

    /// Pipeline configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
