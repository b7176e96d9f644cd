//! Per-stage records and the final deliverable record

use crate::summary::ValidationSummary;
use serde::Serialize;
use warrant_domain::{
    ClaimLedger, Evidence, Gap, LedgerStatistics, ProofBudget, RiskClass, RunId, SolutionOption,
    Stage, TerminationCode, Trigger,
};
use warrant_gatekeeper::{GateResult, RepairOutcome};
use warrant_tuner::{ControlParameters, TuningResult};

/// What happened to one trigger at COMPILE
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerRecord {
    /// Trigger
    pub trigger: Trigger,
    /// Whether it fired
    pub fired: bool,
    /// Whether the collaborator returned evidence
    pub evidence_supplied: bool,
    /// The evidence, when supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
}

/// A field the input omitted and EXPAND drafted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftedField {
    /// Input field (`goal`, `deliverable`, `done_criteria`)
    pub field: &'static str,
    /// Drafted text
    pub text: String,
    /// Claim recording the draft
    pub claim_id: String,
}

/// What one stage did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageRecord {
    /// Stage
    pub stage: Stage,
    /// Gate result, for gated stages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate: Option<GateResult>,
    /// Repair loop outcome, when the loop ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair: Option<RepairOutcome>,
    /// Whether the stage ended with fatal issues
    pub degraded: bool,
    /// Why the stage degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degradation_reason: Option<String>,
    /// Free-form notes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl StageRecord {
    /// Gate result after repair, if the stage was gated
    pub fn final_gate(&self) -> Option<&GateResult> {
        match &self.repair {
            Some(outcome) => Some(&outcome.final_gate),
            None => self.gate.as_ref(),
        }
    }

    /// Whether the stage ran a repair loop
    pub fn repair_fired(&self) -> bool {
        self.repair.as_ref().is_some_and(|r| r.attempts > 0)
    }
}

/// The output of a run
#[derive(Debug, Clone, Serialize)]
pub struct DeliverableRecord {
    /// Run identifier
    pub run_id: RunId,
    /// Objective as given
    pub objective: String,
    /// Classifications and parameters from TUNE
    pub tuning: TuningResult,
    /// Final parameters, after the COMMIT show escalation
    pub parameters: ControlParameters,
    /// Risk class after COMPILE
    pub risk_class: RiskClass,
    /// Proof budget of the risk class
    pub proof_budget: &'static ProofBudget,
    /// Facts supplied by the user
    pub facts: Vec<String>,
    /// Open questions: every gap with its closure
    pub open_questions: Vec<Gap>,
    /// Conservative decisions taken while gaps stay open
    pub assumptions: Vec<String>,
    /// Fields drafted because the input omitted them
    pub drafted: Vec<DraftedField>,
    /// Candidate options with their scores
    pub options: Vec<SolutionOption>,
    /// Recommended option
    pub recommendation: Option<SolutionOption>,
    /// Fallback option
    pub fallback: Option<SolutionOption>,
    /// Claim ledger
    pub claims: ClaimLedger,
    /// Claim ledger statistics
    pub statistics: LedgerStatistics,
    /// Termination code
    pub termination: TerminationCode,
    /// The one next step
    pub next_step: &'static str,
    /// Three-step runbook
    pub runbook: [&'static str; 3],
    /// Per-stage validation
    pub validation: ValidationSummary,
}

impl DeliverableRecord {
    /// Gaps that force TERM-PROTOCOL
    pub fn blocking_questions(&self) -> impl Iterator<Item = &Gap> {
        self.open_questions.iter().filter(|g| g.is_terminal())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warrant_domain::Dossier;
    use warrant_gatekeeper::{GateChecker, RepairLoop};

    #[test]
    fn test_final_gate_prefers_repair() {
        let checker = GateChecker::default_config();
        let mut dossier = Dossier::new();
        let gate = checker.check(Stage::Lint, &dossier, RiskClass::R1);
        let outcome = RepairLoop::new(&checker, 2).run(
            &mut dossier,
            RiskClass::R1,
            gate.clone(),
            &warrant_gatekeeper::ConservativeRepairer::default(),
        );

        let record = StageRecord {
            stage: Stage::Lint,
            gate: Some(gate),
            repair: Some(outcome),
            degraded: false,
            degradation_reason: None,
            notes: Vec::new(),
        };
        assert!(record.final_gate().is_some_and(|g| g.passed()));
        // The gate already passed, so no attempt was made
        assert!(!record.repair_fired());
    }
}
