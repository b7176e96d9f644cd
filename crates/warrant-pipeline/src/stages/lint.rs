use super::{PipelineStage, StageReport};
use crate::context::ProjectContext;
use crate::error::Result;
use warrant_domain::Stage;
use warrant_gatekeeper::{ConservativeRepairer, GateChecker, GateConfig, RepairLoop};

/// Gate configuration for the current run: moderation follows the run
/// parameters, everything else the pipeline configuration
pub(crate) fn run_checker(base: &GateConfig, ctx: &ProjectContext) -> GateChecker {
    GateChecker::new(GateConfig {
        enforce_moderation: ctx.parameters.moderation.is_strict(),
        ..base.clone()
    })
}

/// LINT: the gate battery, with bounded repair when auto-correct is on
pub struct LintStage<'a> {
    config: &'a GateConfig,
}

impl<'a> LintStage<'a> {
    /// Create the stage
    pub fn new(config: &'a GateConfig) -> Self {
        Self { config }
    }
}

impl PipelineStage for LintStage<'_> {
    fn stage(&self) -> Stage {
        Stage::Lint
    }

    fn run(&self, ctx: &mut ProjectContext) -> Result<StageReport> {
        let checker = run_checker(self.config, ctx);
        let gate = checker.check(Stage::Lint, &ctx.dossier, ctx.risk);

        if gate.passed() || !ctx.parameters.auto_correct {
            return Ok(StageReport::gated(gate));
        }

        let repairer = ConservativeRepairer::new(checker.config().max_external_options);
        let outcome = RepairLoop::new(&checker, ctx.parameters.repair_max).run(
            &mut ctx.dossier,
            ctx.risk,
            gate.clone(),
            &repairer,
        );

        Ok(StageReport {
            gate: Some(gate),
            repair: Some(outcome),
            notes: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ProjectInput;
    use warrant_domain::{
        Claim, ClaimStatus, OptionKind, OriginTag, RiskClass, ScoreVector, SolutionOption,
    };
    use warrant_gatekeeper::FindingKind;
    use warrant_tuner::Moderation;

    fn external(id: &str) -> SolutionOption {
        SolutionOption::new(id, id, OptionKind::External, ScoreVector::default()).unwrap()
    }

    fn create_test_context() -> ProjectContext {
        let mut ctx = ProjectContext::new(ProjectInput::new("Pick a vendor")).unwrap();
        ctx.dossier.options = (1..=5).map(|i| external(&format!("O{i}"))).collect();
        ctx
    }

    #[test]
    fn test_clean_dossier_passes() {
        let mut ctx = ProjectContext::new(ProjectInput::new("Pick a vendor")).unwrap();
        let report = LintStage::new(&GateConfig::default()).run(&mut ctx).unwrap();
        assert!(report.gate.unwrap().passed());
        assert!(report.repair.is_none());
    }

    #[test]
    fn test_repair_trims_external_options() {
        let mut ctx = create_test_context();
        let report = LintStage::new(&GateConfig::default()).run(&mut ctx).unwrap();

        assert!(!report.gate.unwrap().passed());
        let outcome = report.repair.unwrap();
        assert!(outcome.passed());
        assert_eq!(outcome.attempts, 1);
        assert_eq!(ctx.dossier.options.len(), 3);
    }

    #[test]
    fn test_moderation_off_skips_cap() {
        let mut ctx = create_test_context();
        ctx.parameters.moderation = Moderation::Off;
        let report = LintStage::new(&GateConfig::default()).run(&mut ctx).unwrap();
        assert!(report.gate.unwrap().passed());
        assert_eq!(ctx.dossier.options.len(), 5);
    }

    #[test]
    fn test_auto_correct_off_leaves_failure() {
        let mut ctx = create_test_context();
        ctx.parameters.auto_correct = false;
        let report = LintStage::new(&GateConfig::default()).run(&mut ctx).unwrap();
        let gate = report.gate.unwrap();
        assert!(!gate.passed());
        assert_eq!(gate.issues()[0].kind, FindingKind::TooManyExternalOptions);
        assert!(report.repair.is_none());
    }

    #[test]
    fn test_unrepairable_issue_degrades() {
        let mut ctx = ProjectContext::new(ProjectInput::new("Pick a vendor")).unwrap();
        ctx.escalate_risk(RiskClass::R2);
        ctx.parameters.repair_max = 2;
        let claim = Claim::builder("C-001", "Vendor uptime is guaranteed", OriginTag::User)
            .status(ClaimStatus::Pass)
            .build()
            .unwrap();
        ctx.dossier.claims.add(claim).unwrap();

        let report = LintStage::new(&GateConfig::default()).run(&mut ctx).unwrap();
        let outcome = report.repair.unwrap();
        assert!(outcome.degraded);
        assert_eq!(outcome.attempts, 2);
    }
}
