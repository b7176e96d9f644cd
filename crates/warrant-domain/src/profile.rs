//! Operating profile selection

use crate::complexity::ComplexityClass;
use crate::risk::RiskClass;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating mode of a run, chosen from risk and complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Profile {
    /// Light review for small, low-risk work
    Simple,
    /// Default review
    Standard,
    /// Maximum scrutiny for high-risk work
    Complex,
    /// Multi-part project
    Projet,
}

impl Profile {
    /// Select a profile
    ///
    /// C3 always yields PROJET; otherwise R2/R3 yield COMPLEX, C2 or a
    /// C1+R1 pairing yields STANDARD, and the remaining low-risk, low-size
    /// pairings yield SIMPLE.
    pub fn select(risk: RiskClass, complexity: ComplexityClass) -> Self {
        use ComplexityClass::*;
        use RiskClass::*;

        match (risk, complexity) {
            (_, C3) => Profile::Projet,
            (R2 | R3, _) => Profile::Complex,
            (_, C2) => Profile::Standard,
            (R1, C1) => Profile::Standard,
            (R0 | R1, C0 | C1) => Profile::Simple,
        }
    }

    /// Get the profile name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Simple => "SIMPLE",
            Profile::Standard => "STANDARD",
            Profile::Complex => "COMPLEX",
            Profile::Projet => "PROJET",
        }
    }

    /// Parse a profile from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SIMPLE" => Some(Profile::Simple),
            "STANDARD" => Some(Profile::Standard),
            "COMPLEX" => Some(Profile::Complex),
            "PROJET" | "PROJECT" => Some(Profile::Projet),
            _ => None,
        }
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid profile: {}", s))
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
