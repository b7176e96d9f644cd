//! Closed tag sets carried by every claim
//!
//! - [`OriginTag`]: where a claim comes from (USER, DED, HYP, GAP)
//! - [`ProofLevel`]: strength of the supporting evidence (S0–S4)
//! - [`Testability`]: how decisively the claim can be checked (T0–T3)
//! - [`ClaimStatus`]: outcome of checking the claim

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OriginTag {
    /// Stated by the user
    User,

    /// Deduced from other claims
    Ded,

    /// Hypothesis, not yet confirmed
    Hyp,

    /// Missing information
    Gap,
}

impl OriginTag {
    /// All origin tags
    pub const ALL: [OriginTag; 4] = [Self::User, Self::Ded, Self::Hyp, Self::Gap];

    /// Get the tag name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            OriginTag::User => "USER",
            OriginTag::Ded => "DED",
            OriginTag::Hyp => "HYP",
            OriginTag::Gap => "GAP",
        }
    }

    /// Parse a tag from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "USER" => Some(OriginTag::User),
            "DED" => Some(OriginTag::Ded),
            "HYP" => Some(OriginTag::Hyp),
            "GAP" => Some(OriginTag::Gap),
            _ => None,
        }
    }
}

impl std::str::FromStr for OriginTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid origin tag: {}", s))
    }
}

impl fmt::Display for OriginTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strength of the evidence behind a claim, ordered weakest to strongest
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ProofLevel {
    /// User statement
    #[default]
    S0,

    /// Reasoning or deduction
    S1,

    /// Cited external source
    S2,

    /// Executed test
    S3,

    /// Measured result
    S4,
}

impl ProofLevel {
    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofLevel::S0 => "S0",
            ProofLevel::S1 => "S1",
            ProofLevel::S2 => "S2",
            ProofLevel::S3 => "S3",
            ProofLevel::S4 => "S4",
        }
    }

    /// Short description of the evidence class
    pub fn description(&self) -> &'static str {
        match self {
            ProofLevel::S0 => "user statement",
            ProofLevel::S1 => "reasoning",
            ProofLevel::S2 => "external source",
            ProofLevel::S3 => "executed test",
            ProofLevel::S4 => "measurement",
        }
    }

    /// Parse a level from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "S0" => Some(ProofLevel::S0),
            "S1" => Some(ProofLevel::S1),
            "S2" => Some(ProofLevel::S2),
            "S3" => Some(ProofLevel::S3),
            "S4" => Some(ProofLevel::S4),
            _ => None,
        }
    }
}

impl fmt::Display for ProofLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How decisively a claim can be checked, ordered weakest to strongest
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Testability {
    /// Not testable
    T0,

    /// Indirectly observable
    #[default]
    T1,

    /// Explicit PASS/FAIL test exists
    T2,

    /// Automated test exists
    T3,
}

impl Testability {
    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Testability::T0 => "T0",
            Testability::T1 => "T1",
            Testability::T2 => "T2",
            Testability::T3 => "T3",
        }
    }

    /// Whether the level carries an explicit PASS/FAIL criterion
    pub fn is_decisive(&self) -> bool {
        *self >= Testability::T2
    }

    /// Parse a level from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "T0" => Some(Testability::T0),
            "T1" => Some(Testability::T1),
            "T2" => Some(Testability::T2),
            "T3" => Some(Testability::T3),
            _ => None,
        }
    }
}

impl fmt::Display for Testability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking a claim
///
/// Only `Pass`, `Fail` and `PendingClosure` are acceptable at a gate.
/// `Untested` exists so that legacy input can be represented and flagged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum ClaimStatus {
    /// Checked and holds
    Pass,

    /// Checked and does not hold
    Fail,

    /// Awaiting the answer to an open question
    #[default]
    PendingClosure,

    /// Never checked
    #[serde(alias = "UNKNOWN")]
    Untested,
}

impl ClaimStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pass => "PASS",
            ClaimStatus::Fail => "FAIL",
            ClaimStatus::PendingClosure => "PENDING-CLOSURE",
            ClaimStatus::Untested => "UNTESTED",
        }
    }

    /// Whether the status is one a gate accepts
    pub fn is_admissible(&self) -> bool {
        !matches!(self, ClaimStatus::Untested)
    }

    /// Whether the claim has been decided either way
    pub fn is_resolved(&self) -> bool {
        matches!(self, ClaimStatus::Pass | ClaimStatus::Fail)
    }

    /// Parse a status from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('_', "-").as_str() {
            "PASS" => Some(ClaimStatus::Pass),
            "FAIL" => Some(ClaimStatus::Fail),
            "PENDING-CLOSURE" => Some(ClaimStatus::PendingClosure),
            "UNTESTED" | "UNKNOWN" => Some(ClaimStatus::Untested),
            _ => None,
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
