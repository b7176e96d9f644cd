//! The per-stage gate battery

use crate::config::GateConfig;
use crate::finding::{union, Finding};
use crate::validator::ProofValidator;
use serde::Serialize;
use tracing::debug;
use warrant_domain::lexicon::{IMPORTANCE, PROMISSORY};
use warrant_domain::{Dossier, RiskClass, Stage};

/// Outcome of one gate check
///
/// `passed` is derived from `issues` at construction and cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateResult {
    stage: Stage,
    passed: bool,
    issues: Vec<Finding>,
    warnings: Vec<Finding>,
}

impl GateResult {
    /// Build a result; identical findings are kept once
    pub fn new(stage: Stage, issues: Vec<Finding>, warnings: Vec<Finding>) -> Self {
        let issues = union(issues);
        let warnings = union(warnings);
        Self {
            stage,
            passed: issues.is_empty(),
            issues,
            warnings,
        }
    }

    /// A passing result with no findings
    pub fn clean(stage: Stage) -> Self {
        Self::new(stage, Vec::new(), Vec::new())
    }

    /// Stage the check ran for
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether no fatal issue was found
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Fatal issues
    pub fn issues(&self) -> &[Finding] {
        &self.issues
    }

    /// Advisory warnings
    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    /// Union with another result, keeping this result's stage
    pub fn merge(self, other: GateResult) -> GateResult {
        let issues = self.issues.into_iter().chain(other.issues).collect();
        let warnings = self.warnings.into_iter().chain(other.warnings).collect();
        GateResult::new(self.stage, issues, warnings)
    }
}

/// Runs the fixed battery of invariant checks over a dossier
#[derive(Debug, Clone, Default)]
pub struct GateChecker {
    config: GateConfig,
    validator: ProofValidator,
}

impl GateChecker {
    /// Create a checker with the given configuration
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            validator: ProofValidator::new(),
        }
    }

    /// Create a checker with default configuration
    pub fn default_config() -> Self {
        Self::new(GateConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Run all checks for a stage
    ///
    /// Checks: (a) per-claim invariants, (b) importance advisory,
    /// (c) proof budget, (d) gap-record completeness, (e) moderation.
    /// The result passes iff no check raised a fatal issue.
    pub fn check(&self, stage: Stage, dossier: &Dossier, risk: RiskClass) -> GateResult {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        self.check_claim_invariants(dossier, &mut issues);
        if self.config.flag_important_gaps {
            self.check_importance(dossier, &mut warnings);
        }
        self.check_proof_budget(dossier, risk, &mut issues, &mut warnings);
        self.check_gap_records(dossier, &mut issues);
        if self.config.enforce_moderation {
            self.check_moderation(dossier, &mut issues, &mut warnings);
        }

        let result = GateResult::new(stage, issues, warnings);
        debug!(
            "Gate {} for {}: {} issue(s), {} warning(s)",
            if result.passed() { "passed" } else { "failed" },
            stage,
            result.issues().len(),
            result.warnings().len()
        );
        result
    }

    /// (a) Origin, GAP closure, causal testability, no promissory text
    fn check_claim_invariants(&self, dossier: &Dossier, issues: &mut Vec<Finding>) {
        for claim in &dossier.claims {
            if claim.is_gap() {
                match &claim.gap_closure {
                    None => issues.push(Finding::missing_gap_closure(&claim.id)),
                    Some(closure) if !closure.is_complete() => issues.push(
                        Finding::incomplete_gap_closure(&claim.id, &closure.missing_fields()),
                    ),
                    Some(_) => {}
                }
            }
            if !claim.validate_strong_causality() {
                issues.push(Finding::weak_causality(&claim.id, claim.testability));
            }
            if self.config.forbid_promissory_claims {
                let words = PROMISSORY.matches(&claim.text);
                if !words.is_empty() {
                    issues.push(Finding::promissory_claim(&claim.id, &words));
                }
            }
        }
    }

    /// (b) Important claims should not rest on gaps
    fn check_importance(&self, dossier: &Dossier, warnings: &mut Vec<Finding>) {
        for claim in dossier.claims.iter().filter(|c| c.is_gap()) {
            let words = IMPORTANCE.matches(&claim.text);
            if !words.is_empty() {
                warnings.push(Finding::important_gap(&claim.id, &words));
            }
        }
    }

    /// (c) Every claim against the proof budget
    fn check_proof_budget(
        &self,
        dossier: &Dossier,
        risk: RiskClass,
        issues: &mut Vec<Finding>,
        warnings: &mut Vec<Finding>,
    ) {
        for claim in &dossier.claims {
            let validation = self.validator.validate_claim(claim, risk);
            issues.extend(validation.issues);
            warnings.extend(validation.warnings);
        }
    }

    /// (d) Every gap record carries its full closure
    fn check_gap_records(&self, dossier: &Dossier, issues: &mut Vec<Finding>) {
        for gap in &dossier.gaps {
            let missing = gap.closure.missing_fields();
            if !missing.is_empty() {
                issues.push(Finding::incomplete_gap_record(gap.id(), &missing));
            }
        }
    }

    /// (e) External option cap and promissory option descriptions
    fn check_moderation(
        &self,
        dossier: &Dossier,
        issues: &mut Vec<Finding>,
        warnings: &mut Vec<Finding>,
    ) {
        let external = dossier.external_options().count();
        if external > self.config.max_external_options {
            issues.push(Finding::too_many_external_options(
                external,
                self.config.max_external_options,
            ));
        }
        for option in &dossier.options {
            let words = PROMISSORY.matches(&option.description);
            if !words.is_empty() {
                warnings.push(Finding::promissory_option(option.id.as_str(), &words));
            }
        }
    }
}
