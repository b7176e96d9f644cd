use super::{PipelineStage, StageReport};
use crate::context::ProjectContext;
use crate::error::Result;
use tracing::{debug, warn};
use warrant_domain::{
    Claim, ClaimStatus, OptionKind, OriginTag, ProofLevel, ScoreVector, SolutionOption, Stage,
    Testability,
};
use warrant_tuner::Budget;

struct Template {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    kind: OptionKind,
    scores: [u8; 8],
}

/// Axis order: robustness, security, simplicity, cost, performance,
/// time_to_ship, operability, scalability
const TEMPLATES: [Template; 3] = [
    Template {
        id: "O1",
        name: "Managed platform",
        description: "Run on a managed cloud service and keep custom code to the glue",
        kind: OptionKind::External,
        scores: [3, 3, 4, 3, 3, 5, 4, 3],
    },
    Template {
        id: "O2",
        name: "Modular monolith",
        description: "One deployable with strict internal module boundaries",
        kind: OptionKind::Internal,
        scores: [4, 4, 4, 4, 3, 4, 4, 2],
    },
    Template {
        id: "O3",
        name: "Distributed services",
        description: "Independent services behind an API gateway",
        kind: OptionKind::Internal,
        scores: [4, 3, 1, 2, 4, 2, 2, 5],
    },
];

/// BRANCH: candidate options and their scoring claims
pub struct BranchStage;

impl BranchStage {
    /// Create the stage
    pub fn new() -> Self {
        Self
    }

    /// Template scores shifted by what the input says
    ///
    /// | Signal | O1 | O2 | O3 |
    /// |---|---|---|---|
    /// | security or PII | security -1 | security +1 | |
    /// | financial | cost -1 | | |
    /// | load or SLA stated | | | performance +1 |
    /// | short budget | time_to_ship +1 | | time_to_ship -1 |
    fn adjust(ctx: &ProjectContext, id: &str, scores: &mut ScoreVector) {
        let risk = &ctx.signals.risk;
        let complexity = &ctx.signals.complexity;
        match id {
            "O1" => {
                if risk.security || risk.pii {
                    scores.adjust("security", -1);
                }
                if risk.financial {
                    scores.adjust("cost", -1);
                }
                if ctx.parameters.budget == Budget::Short {
                    scores.adjust("time_to_ship", 1);
                }
            }
            "O2" => {
                if risk.security || risk.pii {
                    scores.adjust("security", 1);
                }
            }
            "O3" => {
                if complexity.performance_load_sla {
                    scores.adjust("performance", 1);
                }
                if ctx.parameters.budget == Budget::Short {
                    scores.adjust("time_to_ship", -1);
                }
            }
            _ => {}
        }
    }

    /// Supplied options in declaration order, cut to the divergence count;
    /// returns the kept options and the ids of the dropped ones
    fn bound(ctx: &ProjectContext) -> (Vec<SolutionOption>, Vec<String>) {
        let count = ctx.parameters.divergence.branch_count();
        let mut kept = ctx.input.options.clone();
        let dropped = if kept.len() > count {
            kept.split_off(count)
                .into_iter()
                .map(|o| o.id.to_string())
                .collect()
        } else {
            Vec::new()
        };
        (kept, dropped)
    }

    fn generate(ctx: &ProjectContext) -> Result<Vec<SolutionOption>> {
        let count = ctx.parameters.divergence.branch_count();
        TEMPLATES
            .iter()
            .take(count)
            .map(|t| {
                let mut scores = ScoreVector::from_array(t.scores);
                Self::adjust(ctx, t.id, &mut scores);
                Ok(SolutionOption::new(t.id, t.name, t.kind, scores)?
                    .with_description(t.description))
            })
            .collect()
    }
}

impl Default for BranchStage {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStage for BranchStage {
    fn stage(&self) -> Stage {
        Stage::Branch
    }

    fn run(&self, ctx: &mut ProjectContext) -> Result<StageReport> {
        if ctx.is_stop() {
            return Ok(StageReport::notes(vec![
                "STOP budget: no options generated".to_string()
            ]));
        }

        let mut notes = Vec::new();
        let (mut options, source) = if ctx.input.options.is_empty() {
            (Self::generate(ctx)?, "generated")
        } else {
            let (kept, dropped) = Self::bound(ctx);
            if !dropped.is_empty() {
                warn!(dropped = ?dropped, "supplied options beyond the candidate bound dropped");
                notes.push(format!("dropped option(s): {}", dropped.join(", ")));
            }
            (kept, "supplied")
        };

        for option in &mut options {
            option.derive_tradeoffs();
            let claim = Claim::builder(
                ctx.dossier.claims.next_id(),
                format!(
                    "Option {} ({}) scores {}/40",
                    option.id,
                    option.name,
                    option.total()
                ),
                OriginTag::Ded,
            )
            .proof_level(ProofLevel::S1)
            .testability(Testability::T2)
            .status(ClaimStatus::Pass)
            .test_description(format!(
                "Re-score {} on the eight axes with the stakeholders",
                option.id
            ))
            .build()?;
            option.score_claim = Some(claim.id.clone());
            ctx.dossier.claims.add(claim)?;
        }

        debug!(count = options.len(), source, "branched options");
        notes.insert(0, format!("{} option(s) {}", options.len(), source));
        ctx.dossier.options = options;
        Ok(StageReport::notes(notes))
    }
}
