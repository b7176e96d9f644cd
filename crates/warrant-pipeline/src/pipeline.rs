//! The stage orchestrator

use crate::config::PipelineConfig;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::input::ProjectInput;
use crate::record::{DeliverableRecord, StageRecord};
use crate::stages::{
    BranchStage, CommitStage, CompileStage, ExpandStage, LintStage, PipelineStage, SelectStage,
    StageReport, StressStage, TuneStage,
};
use tracing::{info, warn};
use warrant_domain::{EvidenceProvider, NoEvidence};
use warrant_tuner::Tuner;

/// Runs the eight stages over one input
///
/// Every stage runs, even after R3 is established, so the record is complete
/// for audit.
pub struct Pipeline<P = NoEvidence> {
    config: PipelineConfig,
    provider: P,
}

impl Pipeline<NoEvidence> {
    /// Create a pipeline without an evidence collaborator
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            provider: NoEvidence,
        }
    }
}

impl Default for Pipeline<NoEvidence> {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl<P: EvidenceProvider> Pipeline<P> {
    /// Create a pipeline with an evidence collaborator
    pub fn with_provider(config: PipelineConfig, provider: P) -> Self {
        Self { config, provider }
    }

    /// The active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage and return the deliverable record
    pub fn run(&self, input: ProjectInput) -> Result<DeliverableRecord> {
        self.config.validate()?;
        let tuner = Tuner::new(self.config.overrides.merge(&input.overrides));
        let mut ctx = ProjectContext::new(input)?;
        info!(run = %ctx.run_id, "starting review");

        let stages: [&dyn PipelineStage; 8] = [
            &TuneStage::new(&tuner),
            &CompileStage::new(&self.provider),
            &ExpandStage::new(),
            &BranchStage::new(),
            &LintStage::new(&self.config.gate),
            &StressStage::new(&self.config.gate),
            &SelectStage::new(),
            &CommitStage::new(&tuner),
        ];

        for stage in stages {
            run_stage(stage, &mut ctx)?;
        }

        ctx.into_record()
    }
}

fn run_stage(stage: &dyn PipelineStage, ctx: &mut ProjectContext) -> Result<()> {
    let name = stage.stage();
    info!(stage = %name, "stage started");

    let StageReport {
        gate,
        repair,
        notes,
    } = stage.run(ctx)?;

    let (degraded, degradation_reason) = match (&repair, &gate) {
        (Some(outcome), _) => (outcome.degraded, outcome.degradation_reason.clone()),
        (None, Some(gate)) if !gate.passed() => {
            let reason = format!(
                "{} fatal issue(s), no repair attempted",
                gate.issues().len()
            );
            warn!(stage = %name, "{}", reason);
            (true, Some(reason))
        }
        _ => (false, None),
    };

    ctx.validation.record(StageRecord {
        stage: name,
        gate,
        repair,
        degraded,
        degradation_reason,
        notes,
    });
    info!(stage = %name, degraded, "stage finished");
    Ok(())
}
