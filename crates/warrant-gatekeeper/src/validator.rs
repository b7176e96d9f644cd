//! Per-claim proof validation

use crate::finding::Finding;
use serde::Serialize;
use warrant_domain::{Claim, ClaimStatus, OriginTag, ProofLevel, RiskClass};

/// Result of validating one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimValidation {
    /// Whether the claim has no fatal issues
    pub valid: bool,

    /// Fatal issues
    pub issues: Vec<Finding>,

    /// Advisory warnings
    pub warnings: Vec<Finding>,
}

/// Validates claims against the proof budget of a risk class
#[derive(Debug, Clone, Copy, Default)]
pub struct ProofValidator;

impl ProofValidator {
    /// Create a validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a claim
    ///
    /// Fatal: GAP claim without a complete closure, causal claim below T2,
    /// status outside PASS / FAIL / PENDING-CLOSURE, GAP claim still open
    /// under R2 or R3. Advisory: proof level below S2 under R2, HYP claim
    /// still pending.
    pub fn validate_claim(&self, claim: &Claim, risk: RiskClass) -> ClaimValidation {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        // 1. GAP closure
        if claim.is_gap() {
            match &claim.gap_closure {
                None => issues.push(Finding::missing_gap_closure(&claim.id)),
                Some(closure) => {
                    let missing = closure.missing_fields();
                    if !missing.is_empty() {
                        issues.push(Finding::incomplete_gap_closure(&claim.id, &missing));
                    }
                }
            }
        }

        // 2. Causal claims need an explicit PASS/FAIL test
        if !claim.validate_strong_causality() {
            issues.push(Finding::weak_causality(&claim.id, claim.testability));
        }

        // 3. Status
        if !claim.status.is_admissible() {
            issues.push(Finding::inadmissible_status(&claim.id, claim.status));
        }

        // 4. High-risk work may not rest on an open gap
        if claim.is_gap() && claim.status == ClaimStatus::PendingClosure && risk.is_high() {
            issues.push(Finding::open_high_risk_gap(&claim.id, risk));
        }

        // Advisories
        if risk == RiskClass::R2 && claim.proof_level < ProofLevel::S2 {
            warnings.push(Finding::proof_below_budget(&claim.id, claim.proof_level, risk));
        }
        if claim.origin == OriginTag::Hyp && claim.status == ClaimStatus::PendingClosure {
            warnings.push(Finding::pending_hypothesis(&claim.id));
        }

        ClaimValidation {
            valid: issues.is_empty(),
            issues,
            warnings,
        }
    }
}
