use super::{PipelineStage, StageReport};
use crate::context::ProjectContext;
use crate::error::Result;
use warrant_domain::{SolutionOption, Stage};

/// SELECT: rank options by total score
pub struct SelectStage;

impl SelectStage {
    /// Create the stage
    pub fn new() -> Self {
        Self
    }

    /// Options by total score, highest first; ties keep declaration order
    pub fn rank(options: &[SolutionOption]) -> Vec<&SolutionOption> {
        let mut ranked: Vec<_> = options.iter().collect();
        ranked.sort_by(|a, b| b.total().cmp(&a.total()));
        ranked
    }
}

impl Default for SelectStage {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStage for SelectStage {
    fn stage(&self) -> Stage {
        Stage::Select
    }

    fn run(&self, ctx: &mut ProjectContext) -> Result<StageReport> {
        if ctx.is_stop() {
            ctx.recommendation = None;
            ctx.fallback = None;
            return Ok(StageReport::notes(vec![
                "STOP budget: no recommendation".to_string()
            ]));
        }

        let ranked = Self::rank(&ctx.dossier.options);
        let recommendation = ranked.first().map(|o| o.id.clone());
        let fallback = ranked.get(1).map(|o| o.id.clone());

        let note = match (&recommendation, &fallback) {
            (Some(r), Some(f)) => format!("recommend {r}, fallback {f}"),
            (Some(r), None) => format!("recommend {r}, no fallback"),
            _ => "no options to select from".to_string(),
        };

        ctx.recommendation = recommendation;
        ctx.fallback = fallback;
        Ok(StageReport::notes(vec![note]))
    }
}
