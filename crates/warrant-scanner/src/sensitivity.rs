//! What would change a scan's outcome

use crate::extract::LedgerEntry;
use crate::scanner::{ScanMode, Violation};
use serde::{Deserialize, Serialize};
use warrant_domain::{ClaimStatus, RiskClass};

/// Most factors a report lists
pub const MAX_FACTORS: usize = 5;

/// One lever on the scan result, with the check that shows its effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityFactor {
    /// Name of the lever
    pub factor: String,
    /// What moving it would do
    pub impact: String,
    /// Where it flips
    pub threshold: String,
    /// PASS/FAIL condition
    pub test: String,
}

impl SensitivityFactor {
    fn new(factor: &str, impact: String, threshold: &str, test: String) -> Self {
        Self {
            factor: factor.to_string(),
            impact,
            threshold: threshold.to_string(),
            test,
        }
    }
}

/// Top factors for a finished scan, most structural first
pub fn sensitivity_map(
    mode: ScanMode,
    violations: &[Violation],
    claims: &[LedgerEntry],
) -> Vec<SensitivityFactor> {
    let (other, impact, direction) = match mode {
        ScanMode::Light => (
            ScanMode::Max,
            "Switching to max mode would check recency triggers and claim tagging",
            "more",
        ),
        ScanMode::Max => (
            ScanMode::Light,
            "Switching to light mode would skip recency and claim checks",
            "fewer",
        ),
    };
    let mut factors = vec![
        SensitivityFactor::new(
            "Scan Mode",
            impact.to_string(),
            "mode=max vs mode=light",
            format!("PASS if mode={} detects {} violations", other, direction),
        ),
        SensitivityFactor::new(
            "Baseline File",
            "Using a baseline would ignore existing violations, allowing incremental adoption"
                .to_string(),
            "baseline present vs absent",
            "PASS if baseline filters out grandfathered violations".to_string(),
        ),
    ];

    let secrets = violations
        .iter()
        .filter(|v| v.rule_id.starts_with("SEC-"))
        .count();
    if secrets > 0 {
        factors.push(SensitivityFactor::new(
            "Exposed Secrets",
            format!("{} secret(s) detected, high security risk", secrets),
            "secrets > 0",
            "FAIL if any secrets detected; PASS if all secrets removed or redacted".to_string(),
        ));
    }

    let unverified = claims
        .iter()
        .filter(|c| c.needs_source && c.test_status != ClaimStatus::Pass)
        .count();
    if unverified > 0 {
        factors.push(SensitivityFactor::new(
            "Unverified Claims",
            format!("{} claim(s) need sources for recency triggers", unverified),
            "unverified claims > 0",
            "PASS if claims tagged and sourced; FAIL if claims remain UNKNOWN".to_string(),
        ));
    }

    let high = violations
        .iter()
        .filter(|v| v.risk_class == RiskClass::R2)
        .count();
    if high > 0 {
        factors.push(SensitivityFactor::new(
            "High-Risk Violations (R2)",
            format!("{} high-impact violation(s) detected", high),
            "R2 violations > 0",
            "FAIL while R2 violations exist; PASS when all R2 violations resolved".to_string(),
        ));
    }

    factors.truncate(MAX_FACTORS);
    factors
}
