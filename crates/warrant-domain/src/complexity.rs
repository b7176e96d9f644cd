//! Complexity classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the undertaking, ordered C0 < C1 < C2 < C3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComplexityClass {
    /// Trivial
    C0,
    /// Small
    C1,
    /// Medium
    C2,
    /// Large, multi-part
    C3,
}

impl ComplexityClass {
    /// Bucket an additive score: 0→C0, 1→C1, 2–3→C2, ≥4→C3
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => ComplexityClass::C0,
            1 => ComplexityClass::C1,
            2 | 3 => ComplexityClass::C2,
            _ => ComplexityClass::C3,
        }
    }

    /// Classify from boolean signals
    pub fn classify(signals: &ComplexitySignals) -> Self {
        Self::from_score(signals.score())
    }

    /// Get the class name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityClass::C0 => "C0",
            ComplexityClass::C1 => "C1",
            ComplexityClass::C2 => "C2",
            ComplexityClass::C3 => "C3",
        }
    }
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five additive complexity signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexitySignals {
    /// Repository, CI or documentation work
    pub repo_ci_docs: bool,
    /// Authentication, payment, storage or external API
    pub auth_payment_storage_api: bool,
    /// Security, compliance or sensitive data
    pub security_compliance_data: bool,
    /// Performance, load or SLA targets
    pub performance_load_sla: bool,
    /// Production or business-critical system
    pub production_critical: bool,
}

impl ComplexitySignals {
    /// Number of signals set (0–5)
    pub fn score(&self) -> u8 {
        [
            self.repo_ci_docs,
            self.auth_payment_storage_api,
            self.security_compliance_data,
            self.performance_load_sla,
            self.production_critical,
        ]
        .into_iter()
        .filter(|set| *set)
        .count() as u8
    }

    /// Signal-wise OR
    pub fn merge(&self, other: &ComplexitySignals) -> ComplexitySignals {
        ComplexitySignals {
            repo_ci_docs: self.repo_ci_docs || other.repo_ci_docs,
            auth_payment_storage_api: self.auth_payment_storage_api
                || other.auth_payment_storage_api,
            security_compliance_data: self.security_compliance_data
                || other.security_compliance_data,
            performance_load_sla: self.performance_load_sla || other.performance_load_sla,
            production_critical: self.production_critical || other.production_critical,
        }
    }
}
