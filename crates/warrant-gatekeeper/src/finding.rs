//! Gate findings: fatal issues and advisory warnings

use serde::{Deserialize, Serialize};
use std::fmt;
use warrant_domain::{ClaimId, ClaimStatus, ProofLevel, RiskClass, Testability};

/// Kind of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// GAP claim without a closure
    MissingGapClosure,
    /// GAP claim whose closure has empty fields
    IncompleteGapClosure,
    /// Causal claim below T2
    WeakCausality,
    /// Promissory vocabulary in a claim
    PromissoryClaim,
    /// Claim status outside PASS / FAIL / PENDING-CLOSURE
    InadmissibleStatus,
    /// GAP claim still open under R2/R3
    OpenHighRiskGap,
    /// Gap record with empty fields
    IncompleteGapRecord,
    /// More external options than moderation allows
    TooManyExternalOptions,
    /// Claims contradict each other
    Contradiction,
    /// Dependency on a claim that does not exist
    MissingDependency,
    /// Budget requires alternatives but fewer than two exist
    MissingAlternatives,
    /// Too few claims at the budget's proof level
    InsufficientPillars,
    /// High-risk work without stated security guardrails
    MissingGuardrails,
    /// Proof level below the R2 budget
    ProofBelowBudget,
    /// HYP claim still pending
    PendingHypothesis,
    /// Important claim resting on a gap
    ImportantGap,
    /// Promissory vocabulary in an option description
    PromissoryOption,
    /// No budget constraint stated
    MissingBudget,
    /// No operations section stated
    MissingOps,
    /// Input tries to override the review's authority
    AuthorityInjection,
    /// Tool trigger fired but no evidence came back
    UnsupportedTrigger,
}

impl FindingKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::MissingGapClosure => "missing_gap_closure",
            FindingKind::IncompleteGapClosure => "incomplete_gap_closure",
            FindingKind::WeakCausality => "weak_causality",
            FindingKind::PromissoryClaim => "promissory_claim",
            FindingKind::InadmissibleStatus => "inadmissible_status",
            FindingKind::OpenHighRiskGap => "open_high_risk_gap",
            FindingKind::IncompleteGapRecord => "incomplete_gap_record",
            FindingKind::TooManyExternalOptions => "too_many_external_options",
            FindingKind::Contradiction => "contradiction",
            FindingKind::MissingDependency => "missing_dependency",
            FindingKind::MissingAlternatives => "missing_alternatives",
            FindingKind::InsufficientPillars => "insufficient_pillars",
            FindingKind::MissingGuardrails => "missing_guardrails",
            FindingKind::ProofBelowBudget => "proof_below_budget",
            FindingKind::PendingHypothesis => "pending_hypothesis",
            FindingKind::ImportantGap => "important_gap",
            FindingKind::PromissoryOption => "promissory_option",
            FindingKind::MissingBudget => "missing_budget",
            FindingKind::MissingOps => "missing_ops",
            FindingKind::AuthorityInjection => "authority_injection",
            FindingKind::UnsupportedTrigger => "unsupported_trigger",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One issue or warning raised by a check
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    /// What kind of problem
    pub kind: FindingKind,
    /// Claim, gap or option id the finding is about
    pub subject: Option<String>,
    /// Human-readable description
    pub message: String,
}

impl Finding {
    /// Create a finding
    pub fn new(kind: FindingKind, subject: Option<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject,
            message: message.into(),
        }
    }

    /// GAP claim without a closure
    pub fn missing_gap_closure(claim: &ClaimId) -> Self {
        Self::new(
            FindingKind::MissingGapClosure,
            Some(claim.to_string()),
            format!("GAP claim {} has no gap closure", claim),
        )
    }

    /// GAP claim whose closure lacks fields
    pub fn incomplete_gap_closure(claim: &ClaimId, fields: &[&str]) -> Self {
        Self::new(
            FindingKind::IncompleteGapClosure,
            Some(claim.to_string()),
            format!("GAP claim {} closure is missing: {}", claim, fields.join(", ")),
        )
    }

    /// Causal claim below T2
    pub fn weak_causality(claim: &ClaimId, testability: Testability) -> Self {
        Self::new(
            FindingKind::WeakCausality,
            Some(claim.to_string()),
            format!(
                "Causal claim {} is {}; causal claims need T2 or better",
                claim, testability
            ),
        )
    }

    /// Promissory words in a claim
    pub fn promissory_claim(claim: &ClaimId, words: &[&str]) -> Self {
        Self::new(
            FindingKind::PromissoryClaim,
            Some(claim.to_string()),
            format!("Claim {} uses promissory language: {}", claim, words.join(", ")),
        )
    }

    /// Status outside the admissible set
    pub fn inadmissible_status(claim: &ClaimId, status: ClaimStatus) -> Self {
        Self::new(
            FindingKind::InadmissibleStatus,
            Some(claim.to_string()),
            format!(
                "Claim {} has status {}; expected PASS, FAIL or PENDING-CLOSURE",
                claim, status
            ),
        )
    }

    /// GAP claim still open under high risk
    pub fn open_high_risk_gap(claim: &ClaimId, risk: RiskClass) -> Self {
        Self::new(
            FindingKind::OpenHighRiskGap,
            Some(claim.to_string()),
            format!("GAP claim {} is still open under {}", claim, risk),
        )
    }

    /// Gap record with empty fields
    pub fn incomplete_gap_record(gap_id: &str, fields: &[&str]) -> Self {
        Self::new(
            FindingKind::IncompleteGapRecord,
            Some(gap_id.to_string()),
            format!("Gap {} is missing: {}", gap_id, fields.join(", ")),
        )
    }

    /// External options above the moderation cap
    pub fn too_many_external_options(count: usize, max: usize) -> Self {
        Self::new(
            FindingKind::TooManyExternalOptions,
            None,
            format!("{} external options exceed the moderation limit of {}", count, max),
        )
    }

    /// Proof level below the R2 budget
    pub fn proof_below_budget(claim: &ClaimId, level: ProofLevel, risk: RiskClass) -> Self {
        Self::new(
            FindingKind::ProofBelowBudget,
            Some(claim.to_string()),
            format!("Claim {} at {} is below the {} proof budget", claim, level, risk),
        )
    }

    /// HYP claim awaiting closure
    pub fn pending_hypothesis(claim: &ClaimId) -> Self {
        Self::new(
            FindingKind::PendingHypothesis,
            Some(claim.to_string()),
            format!("Hypothesis {} is still pending closure", claim),
        )
    }

    /// Important claim tagged GAP
    pub fn important_gap(claim: &ClaimId, words: &[&str]) -> Self {
        Self::new(
            FindingKind::ImportantGap,
            Some(claim.to_string()),
            format!(
                "Important claim {} ({}) rests on a gap",
                claim,
                words.join(", ")
            ),
        )
    }

    /// Promissory words in an option description
    pub fn promissory_option(option: &str, words: &[&str]) -> Self {
        Self::new(
            FindingKind::PromissoryOption,
            Some(option.to_string()),
            format!("Option {} promises: {}", option, words.join(", ")),
        )
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Union of findings: identical findings are kept once, first occurrence wins
pub fn union(findings: impl IntoIterator<Item = Finding>) -> Vec<Finding> {
    let mut out: Vec<Finding> = Vec::new();
    for finding in findings {
        if !out.contains(&finding) {
            out.push(finding);
        }
    }
    out
}
