use super::{PipelineStage, StageReport};
use crate::context::ProjectContext;
use crate::error::Result;
use tracing::info;
use warrant_domain::{RiskClass, Stage, TerminationCode};
use warrant_tuner::{ShowSignals, Tuner};

/// Decide the termination code
///
/// Strict priority: R3 refuses; a blocking gap asks for answers; a failing
/// final gate or a missing recommendation is partial; anything else is
/// delivered.
pub fn decide_termination(
    risk: RiskClass,
    has_blocking_gap: bool,
    gate_failed: bool,
    has_recommendation: bool,
) -> TerminationCode {
    if risk == RiskClass::R3 {
        TerminationCode::Refused
    } else if has_blocking_gap {
        TerminationCode::Protocol
    } else if gate_failed || !has_recommendation {
        TerminationCode::Partial
    } else {
        TerminationCode::Delivered
    }
}

/// COMMIT: termination code, next step, runbook, final show escalation
pub struct CommitStage<'a> {
    tuner: &'a Tuner,
}

impl<'a> CommitStage<'a> {
    /// Create the stage
    pub fn new(tuner: &'a Tuner) -> Self {
        Self { tuner }
    }
}

impl PipelineStage for CommitStage<'_> {
    fn stage(&self) -> Stage {
        Stage::Commit
    }

    fn run(&self, ctx: &mut ProjectContext) -> Result<StageReport> {
        let gate_failed = ctx.validation.gate_failed(Stage::Lint)
            || ctx.validation.gate_failed(Stage::Stress);
        let decided = decide_termination(
            ctx.risk,
            ctx.has_blocking_gap(),
            gate_failed,
            ctx.recommendation.is_some(),
        );
        // REFUSED is final
        let code = match ctx.termination {
            Some(TerminationCode::Refused) => TerminationCode::Refused,
            _ => decided,
        };
        ctx.termination = Some(code);

        self.tuner.finalize(
            &mut ctx.parameters,
            &ShowSignals {
                risk: Some(ctx.risk),
                repair_fired: ctx.validation.repair_fired(),
                gap_count: ctx.dossier.gaps.len(),
                termination: Some(code),
            },
        );

        info!(termination = %code, risk = %ctx.risk, "run committed");
        Ok(StageReport::notes(vec![
            code.to_string(),
            format!("next step: {}", code.next_step()),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ProjectInput;
    use warrant_domain::OptionId;
    use warrant_tuner::ShowMode;

    #[test]
    fn test_priority_order() {
        use TerminationCode::*;
        assert_eq!(decide_termination(RiskClass::R3, true, true, true), Refused);
        assert_eq!(decide_termination(RiskClass::R2, true, true, true), Protocol);
        assert_eq!(decide_termination(RiskClass::R2, false, true, true), Partial);
        assert_eq!(decide_termination(RiskClass::R1, false, false, false), Partial);
        assert_eq!(decide_termination(RiskClass::R1, false, false, true), Delivered);
    }

    #[test]
    fn test_refused_is_never_replaced() {
        let mut ctx = ProjectContext::new(ProjectInput::new("Host the team wiki")).unwrap();
        ctx.termination = Some(TerminationCode::Refused);
        ctx.recommendation = Some(OptionId::new("O1"));
        let tuner = Tuner::default();
        CommitStage::new(&tuner).run(&mut ctx).unwrap();
        assert_eq!(ctx.termination, Some(TerminationCode::Refused));
    }

    #[test]
    fn test_commit_escalates_show() {
        let mut ctx = ProjectContext::new(ProjectInput::new("Host the team wiki")).unwrap();
        ctx.parameters.show = ShowMode::Off;
        let tuner = Tuner::default();
        CommitStage::new(&tuner).run(&mut ctx).unwrap();
        // No recommendation: PARTIAL, which requires the state to be shown
        assert_eq!(ctx.termination, Some(TerminationCode::Partial));
        assert_eq!(ctx.parameters.show, ShowMode::State);
    }
}
