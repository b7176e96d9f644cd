//! The eight pipeline stages
//!
//! Each stage transforms the shared [`ProjectContext`] in place and reports
//! what it checked. The pipeline turns reports into stage records.

mod branch;
mod commit;
mod compile;
mod expand;
mod lint;
mod select;
mod stress;
mod tune;

pub use branch::BranchStage;
pub use commit::{decide_termination, CommitStage};
pub use compile::CompileStage;
pub use expand::ExpandStage;
pub use lint::LintStage;
pub use select::SelectStage;
pub use stress::StressStage;
pub use tune::TuneStage;

use crate::context::ProjectContext;
use crate::error::Result;
use warrant_domain::Stage;
use warrant_gatekeeper::{GateResult, RepairOutcome};

/// What a stage reports back to the pipeline
#[derive(Debug, Clone, Default)]
pub struct StageReport {
    /// Gate result, for gated stages
    pub gate: Option<GateResult>,
    /// Repair loop outcome, when the loop ran
    pub repair: Option<RepairOutcome>,
    /// Free-form notes
    pub notes: Vec<String>,
}

impl StageReport {
    /// A report with notes only
    pub fn notes(notes: Vec<String>) -> Self {
        Self {
            notes,
            ..Default::default()
        }
    }

    /// A report carrying a gate result
    pub fn gated(gate: GateResult) -> Self {
        Self {
            gate: Some(gate),
            ..Default::default()
        }
    }
}

/// One stage of the pipeline
pub trait PipelineStage {
    /// Which stage this is
    fn stage(&self) -> Stage;

    /// Transform the context
    fn run(&self, ctx: &mut ProjectContext) -> Result<StageReport>;
}
