//! The aggregate one run threads through its stages

use crate::error::{PipelineError, Result};
use crate::input::ProjectInput;
use crate::record::{DeliverableRecord, DraftedField};
use crate::signals::{derive_signals, DerivedSignals};
use crate::summary::ValidationSummary;
use std::collections::HashSet;
use tracing::debug;
use warrant_domain::{
    ClaimId, Dossier, Gap, GapPriority, OptionId, ProofBudget, RiskClass, RunId, SolutionOption,
    Stage, TerminationCode,
};
use warrant_tuner::{ControlParameters, TuningResult};

/// Mutable state of one run
///
/// Created once per input, mutated in place by each stage and consumed by
/// [`ProjectContext::into_record`] after COMMIT, so nothing can touch the
/// claims once the record exists.
#[derive(Debug)]
pub struct ProjectContext {
    /// Run identifier
    pub run_id: RunId,
    /// Input as given
    pub input: ProjectInput,
    /// Declared plus detected signals
    pub signals: DerivedSignals,
    /// Set at TUNE
    pub tuning: Option<TuningResult>,
    /// Current parameters
    pub parameters: ControlParameters,
    /// Current risk class; only ever escalated
    pub risk: RiskClass,
    /// Proof budget of the current risk class
    pub proof_budget: &'static ProofBudget,
    /// Claims, gaps and options
    pub dossier: Dossier,
    /// Facts supplied by the user
    pub facts: Vec<String>,
    /// Conservative decisions taken for open gaps
    pub assumptions: Vec<String>,
    /// Fields drafted at EXPAND
    pub drafted: Vec<DraftedField>,
    /// Recommended option, set at SELECT
    pub recommendation: Option<OptionId>,
    /// Fallback option, set at SELECT
    pub fallback: Option<OptionId>,
    /// Per-stage validation
    pub validation: ValidationSummary,
    /// Set at COMMIT
    pub termination: Option<TerminationCode>,
}

impl ProjectContext {
    /// Create a context; user claims enter the ledger here, so invalid or
    /// duplicate claims reject the whole input
    ///
    /// Every GAP claim also opens a gap record, blocking unless the claim
    /// declares itself advisory.
    pub fn new(input: ProjectInput) -> Result<Self> {
        input.validate()?;

        let signals = derive_signals(&input);
        let risk = RiskClass::classify(&signals.risk);

        let mut dossier = Dossier::new();
        let mut assumptions = Vec::new();
        let mut ids = ClaimIds::reserving(&input);
        for claim_input in input.claims.iter().cloned() {
            let priority = claim_input.gap_priority.unwrap_or(GapPriority::Blocking);
            let fallback = match &claim_input.id {
                Some(id) => ClaimId::new(id.as_str()),
                None => ids.next(),
            };
            let claim = claim_input.into_claim(fallback)?;
            if let Some(closure) = claim.gap_closure.clone().filter(|_| claim.is_gap()) {
                assumptions.push(format!(
                    "{}: {} ({})",
                    closure.gap_id, closure.decision, claim.id
                ));
                dossier.gaps.add(Gap::new(closure, priority)?)?;
            }
            dossier.claims.add(claim)?;
        }

        let run_id = RunId::new();
        debug!(
            run = %run_id,
            started_ms = run_id.timestamp(),
            claims = dossier.claims.len(),
            gaps = dossier.gaps.len(),
            "created project context"
        );

        Ok(Self {
            run_id,
            input,
            signals,
            tuning: None,
            parameters: ControlParameters::default(),
            risk,
            proof_budget: ProofBudget::for_risk(risk),
            dossier,
            facts: Vec::new(),
            assumptions,
            drafted: Vec::new(),
            recommendation: None,
            fallback: None,
            validation: ValidationSummary::new(),
            termination: None,
        })
    }

    /// Raise the risk class; a lower class is ignored
    pub fn escalate_risk(&mut self, risk: RiskClass) {
        let escalated = self.risk.escalate(risk);
        if escalated != self.risk {
            debug!(from = %self.risk, to = %escalated, "risk escalated");
        }
        self.risk = escalated;
        self.proof_budget = ProofBudget::for_risk(escalated);
    }

    /// Whether the proof budget signals STOP
    pub fn is_stop(&self) -> bool {
        self.proof_budget.is_stop()
    }

    /// Look up an option by id
    pub fn option(&self, id: &OptionId) -> Option<&SolutionOption> {
        self.dossier.options.iter().find(|o| &o.id == id)
    }

    /// Whether any blocking gap is recorded
    pub fn has_blocking_gap(&self) -> bool {
        self.dossier.gaps.blocking().next().is_some()
    }

    /// Consume the context into the deliverable record
    ///
    /// Fails if TUNE or COMMIT has not run.
    pub fn into_record(self) -> Result<DeliverableRecord> {
        let tuning = self.tuning.ok_or(PipelineError::Incomplete(Stage::Tune))?;
        let termination = self
            .termination
            .ok_or(PipelineError::Incomplete(Stage::Commit))?;
        let recommendation = self
            .recommendation
            .as_ref()
            .and_then(|id| self.dossier.options.iter().find(|o| &o.id == id))
            .cloned();
        let fallback = self
            .fallback
            .as_ref()
            .and_then(|id| self.dossier.options.iter().find(|o| &o.id == id))
            .cloned();
        let statistics = self.dossier.claims.statistics();

        Ok(DeliverableRecord {
            run_id: self.run_id,
            objective: self.input.objective,
            tuning,
            parameters: self.parameters,
            risk_class: self.risk,
            proof_budget: self.proof_budget,
            facts: self.facts,
            open_questions: self.dossier.gaps.iter().cloned().collect(),
            assumptions: self.assumptions,
            drafted: self.drafted,
            options: self.dossier.options,
            recommendation,
            fallback,
            claims: self.dossier.claims,
            statistics,
            termination,
            next_step: termination.next_step(),
            runbook: termination.runbook(),
            validation: self.validation,
        })
    }
}

/// Sequential ids for id-less user claims, skipping every explicit id
struct ClaimIds<'a> {
    reserved: HashSet<&'a str>,
    n: usize,
}

impl<'a> ClaimIds<'a> {
    fn reserving(input: &'a ProjectInput) -> Self {
        Self {
            reserved: input.claims.iter().filter_map(|c| c.id.as_deref()).collect(),
            n: 0,
        }
    }

    fn next(&mut self) -> ClaimId {
        loop {
            self.n += 1;
            let id = ClaimId::sequential(self.n);
            if !self.reserved.contains(id.as_str()) {
                return id;
            }
        }
    }
}
