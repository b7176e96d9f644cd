//! Construction-time rejections

use thiserror::Error;

/// Errors raised when a domain value would violate its invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Claim text is empty
    #[error("Claim {0} has empty text")]
    EmptyClaimText(String),

    /// A GAP claim was built without a closure
    #[error("GAP claim {0} has no gap closure")]
    MissingGapClosure(String),

    /// A gap closure is missing one or more fields
    #[error("Gap closure {gap_id} is missing: {}", fields.join(", "))]
    IncompleteGapClosure {
        /// Gap identifier
        gap_id: String,
        /// Names of the empty fields
        fields: Vec<&'static str>,
    },

    /// A claim id is already present in the ledger
    #[error("Duplicate claim id: {0}")]
    DuplicateClaim(String),

    /// A gap id is already present in the ledger
    #[error("Duplicate gap id: {0}")]
    DuplicateGap(String),

    /// An option id is used twice
    #[error("Duplicate option id: {0}")]
    DuplicateOption(String),

    /// A score axis is outside 0–5
    #[error("Option {option}: score {value} on {axis} is outside 0-5")]
    ScoreOutOfRange {
        /// Option identifier
        option: String,
        /// Axis name
        axis: &'static str,
        /// Offending value
        value: u8,
    },
}

/// Result alias for domain construction
pub type Result<T> = std::result::Result<T, DomainError>;
