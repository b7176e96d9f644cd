use super::{PipelineStage, StageReport};
use crate::context::ProjectContext;
use crate::error::Result;
use tracing::debug;
use warrant_domain::Stage;
use warrant_tuner::{TuneRequest, Tuner};

/// TUNE: derive the run parameters
pub struct TuneStage<'a> {
    tuner: &'a Tuner,
}

impl<'a> TuneStage<'a> {
    /// Create the stage
    pub fn new(tuner: &'a Tuner) -> Self {
        Self { tuner }
    }
}

impl PipelineStage for TuneStage<'_> {
    fn stage(&self) -> Stage {
        Stage::Tune
    }

    fn run(&self, ctx: &mut ProjectContext) -> Result<StageReport> {
        let request = TuneRequest {
            objective: ctx.input.objective.clone(),
            deliverable: ctx.input.deliverable.clone().unwrap_or_default(),
            risk: ctx.signals.risk,
            complexity: ctx.signals.complexity,
            has_important_claims: ctx.signals.has_important_claims,
        };
        let result = self.tuner.tune(&request);
        debug!(profile = %result.profile, "tuning complete");

        let mut notes = vec![format!(
            "{} / {} (score {}) / {} -> {}",
            result.risk_class,
            result.complexity_class,
            result.complexity_score,
            result.deliverable_type,
            result.profile
        )];
        if !result.applied_overrides.is_empty() {
            notes.push(format!(
                "overrides applied: {}",
                result.applied_overrides.join(", ")
            ));
        }
        if !result.ignored_overrides.is_empty() {
            notes.push(format!(
                "overrides ignored: {}",
                result.ignored_overrides.join(", ")
            ));
        }

        ctx.escalate_risk(result.risk_class);
        ctx.parameters = result.parameters.clone();
        ctx.tuning = Some(result);
        Ok(StageReport::notes(notes))
    }
}
