//! Bounded repair with mandatory degradation
//!
//! ```text
//! ATTEMPT(n) → repair → RE-GATE → PASS
//!                          └────→ ATTEMPT(n+1), until n = repair_max → DEGRADED
//! ```
//!
//! Repairs are corrective only: they fill conservative closure text, reset
//! inadmissible statuses, raise testability where a test already exists,
//! and trim excess external options. They never invent facts, so issues such
//! as promissory text or an open high-risk gap survive every attempt.

use crate::finding::{Finding, FindingKind};
use crate::gate::{GateChecker, GateResult};
use serde::Serialize;
use tracing::{debug, info, warn};
use warrant_domain::{
    Claim, ClaimId, ClaimLedger, ClaimStatus, Dossier, GapClosure, RiskClass, Stage, Testability,
};

/// One correction applied by a repairer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairAction {
    /// Finding the action answers
    pub kind: FindingKind,
    /// Claim, gap or option touched
    pub subject: Option<String>,
    /// What was changed
    pub description: String,
}

impl RepairAction {
    fn new(kind: FindingKind, subject: Option<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            subject,
            description: description.into(),
        }
    }
}

/// Record of one repair attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairAttempt {
    /// Attempt number, starting at 1
    pub attempt: u32,
    /// Fatal issues the attempt tried to repair
    pub issues: Vec<Finding>,
    /// Corrections applied
    pub actions: Vec<RepairAction>,
    /// Whether the re-gate passed
    pub passed: bool,
}

/// Outcome of a repair loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairOutcome {
    /// Stage being repaired
    pub stage: Stage,
    /// Number of attempts made
    pub attempts: u32,
    /// Per-attempt history
    pub history: Vec<RepairAttempt>,
    /// Gate result after the last attempt
    pub final_gate: GateResult,
    /// Whether the budget ran out with the gate still failing
    pub degraded: bool,
    /// Why the stage degraded
    pub degradation_reason: Option<String>,
}

impl RepairOutcome {
    /// Whether the final gate passed
    pub fn passed(&self) -> bool {
        self.final_gate.passed()
    }
}

/// Something that can correct a dossier in response to fatal findings
pub trait Repairer {
    /// Apply corrections for `issues`, returning what was changed
    fn repair(&self, dossier: &mut Dossier, issues: &[Finding]) -> Vec<RepairAction>;
}

impl<F> Repairer for F
where
    F: Fn(&mut Dossier, &[Finding]) -> Vec<RepairAction>,
{
    fn repair(&self, dossier: &mut Dossier, issues: &[Finding]) -> Vec<RepairAction> {
        self(dossier, issues)
    }
}

/// The default repair contract
#[derive(Debug, Clone, Copy)]
pub struct ConservativeRepairer {
    max_external_options: usize,
}

impl ConservativeRepairer {
    /// Create a repairer that trims external options to `max_external_options`
    pub fn new(max_external_options: usize) -> Self {
        Self {
            max_external_options,
        }
    }
}

impl Default for ConservativeRepairer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_EXTERNAL_OPTIONS)
    }
}

fn claim_mut<'a>(claims: &'a mut ClaimLedger, id: Option<&str>) -> Option<&'a mut Claim> {
    claims.get_mut(&ClaimId::new(id?))
}

impl Repairer for ConservativeRepairer {
    fn repair(&self, dossier: &mut Dossier, issues: &[Finding]) -> Vec<RepairAction> {
        let mut actions = Vec::new();
        let Dossier {
            claims,
            gaps,
            options,
        } = dossier;

        for issue in issues {
            let subject = issue.subject.clone();
            match issue.kind {
                FindingKind::MissingGapClosure => {
                    let Some(claim) = claim_mut(claims, subject.as_deref()) else {
                        continue;
                    };
                    if claim.gap_closure.is_none() {
                        let gap_id = format!("GAP-{}", claim.id);
                        claim.gap_closure =
                            Some(GapClosure::conservative(gap_id, claim.text.clone()));
                        actions.push(RepairAction::new(
                            issue.kind,
                            subject,
                            "attached a conservative gap closure",
                        ));
                    }
                }
                FindingKind::IncompleteGapClosure => {
                    let Some(claim) = claim_mut(claims, subject.as_deref()) else {
                        continue;
                    };
                    let Some(closure) = claim.gap_closure.as_mut() else {
                        continue;
                    };
                    let mut filled = match gaps.get(&closure.gap_id) {
                        Some(record) => closure.fill_missing_from(&record.closure),
                        None => Vec::new(),
                    };
                    filled.extend(closure.fill_missing());
                    if !filled.is_empty() {
                        actions.push(RepairAction::new(
                            issue.kind,
                            subject,
                            format!("filled closure fields: {}", filled.join(", ")),
                        ));
                    }
                }
                FindingKind::IncompleteGapRecord => {
                    let Some(gap) = subject.as_deref().and_then(|id| gaps.get_mut(id)) else {
                        continue;
                    };
                    let filled = gap.closure.fill_missing();
                    if !filled.is_empty() {
                        actions.push(RepairAction::new(
                            issue.kind,
                            subject,
                            format!("filled gap fields: {}", filled.join(", ")),
                        ));
                    }
                }
                FindingKind::InadmissibleStatus => {
                    let Some(claim) = claim_mut(claims, subject.as_deref()) else {
                        continue;
                    };
                    if !claim.status.is_admissible() {
                        claim.status = ClaimStatus::PendingClosure;
                        actions.push(RepairAction::new(
                            issue.kind,
                            subject,
                            "status set to PENDING-CLOSURE",
                        ));
                    }
                }
                FindingKind::WeakCausality => {
                    let Some(claim) = claim_mut(claims, subject.as_deref()) else {
                        continue;
                    };
                    let has_test = claim
                        .test_description
                        .as_deref()
                        .is_some_and(|t| !t.trim().is_empty());
                    if has_test && !claim.testability.is_decisive() {
                        claim.testability = Testability::T2;
                        actions.push(RepairAction::new(
                            issue.kind,
                            subject,
                            "testability raised to T2 on its stated test",
                        ));
                    }
                }
                FindingKind::TooManyExternalOptions => {
                    let mut kept_external = 0;
                    let mut dropped = Vec::new();
                    options.retain(|option| {
                        if !option.is_external() {
                            return true;
                        }
                        kept_external += 1;
                        let keep = kept_external <= self.max_external_options;
                        if !keep {
                            dropped.push(option.clone());
                        }
                        keep
                    });
                    if dropped.is_empty() {
                        continue;
                    }
                    // Score claims about dropped options go with them
                    let retracted: Vec<_> = dropped
                        .iter()
                        .filter_map(|o| o.score_claim.as_ref())
                        .filter_map(|id| claims.remove(id))
                        .map(|c| c.id.to_string())
                        .collect();
                    let ids: Vec<_> = dropped.iter().map(|o| o.id.as_str()).collect();
                    let mut description = format!(
                        "dropped external option(s) {} beyond the first {}",
                        ids.join(", "),
                        self.max_external_options
                    );
                    if !retracted.is_empty() {
                        description.push_str(&format!(
                            "; retracted score claim(s) {}",
                            retracted.join(", ")
                        ));
                    }
                    actions.push(RepairAction::new(issue.kind, None, description));
                }
                // Needs new information from a human
                _ => {}
            }
        }
        actions
    }
}

/// Bounded retry around the gate checker
pub struct RepairLoop<'a> {
    checker: &'a GateChecker,
    repair_max: u32,
}

impl<'a> RepairLoop<'a> {
    /// Create a loop allowing at most `repair_max` attempts
    pub fn new(checker: &'a GateChecker, repair_max: u32) -> Self {
        Self {
            checker,
            repair_max,
        }
    }

    /// Repair until the gate passes or the budget is spent
    ///
    /// `initial` is the failing gate result that triggered the loop. A zero
    /// budget with a failing gate degrades immediately.
    pub fn run<R: Repairer + ?Sized>(
        &self,
        dossier: &mut Dossier,
        risk: RiskClass,
        initial: GateResult,
        repairer: &R,
    ) -> RepairOutcome {
        let stage = initial.stage();
        let mut gate = initial;
        let mut history = Vec::new();
        let mut attempts = 0;

        while !gate.passed() && attempts < self.repair_max {
            attempts += 1;
            let actions = repairer.repair(dossier, gate.issues());
            debug!(
                "{} repair attempt {}/{}: {} action(s)",
                stage,
                attempts,
                self.repair_max,
                actions.len()
            );
            let regate = self.checker.check(stage, dossier, risk);
            history.push(RepairAttempt {
                attempt: attempts,
                issues: gate.issues().to_vec(),
                actions,
                passed: regate.passed(),
            });
            gate = regate;
        }

        let degraded = !gate.passed();
        let degradation_reason = if degraded {
            let reason = format!(
                "{} fatal issue(s) remain after {} repair attempt(s): {}",
                gate.issues().len(),
                attempts,
                gate.issues()
                    .iter()
                    .map(|f| f.kind.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            warn!("{} degraded: {}", stage, reason);
            Some(reason)
        } else {
            info!("{} repaired after {} attempt(s)", stage, attempts);
            None
        };

        RepairOutcome {
            stage,
            attempts,
            history,
            final_gate: gate,
            degraded,
            degradation_reason,
        }
    }
}
