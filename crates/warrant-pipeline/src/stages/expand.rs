use super::{PipelineStage, StageReport};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::input::{is_unspecified, render_value, SectionKind};
use crate::record::DraftedField;
use tracing::debug;
use warrant_domain::gap::conservative;
use warrant_domain::{
    Claim, ClaimStatus, Gap, GapClosure, GapPriority, OriginTag, ProofLevel, Stage, Testability,
};

/// EXPAND: facts, gaps and assumptions from the input
///
/// Every declared but unspecified entry becomes a gap record plus a GAP
/// claim; nothing is silently defaulted.
pub struct ExpandStage;

impl ExpandStage {
    /// Create the stage
    pub fn new() -> Self {
        Self
    }

    fn impact(kind: SectionKind) -> &'static str {
        match kind {
            SectionKind::UsersLoad | SectionKind::SlaSlo => {
                "Sizing and performance conclusions may not hold"
            }
            SectionKind::Constraints => "The recommendation may violate the constraint",
            SectionKind::Security => "Security guardrails may be missing or wrong",
            SectionKind::Data => "Data handling may not meet its obligations",
            SectionKind::Ops | SectionKind::AiMl => conservative::IMPACT,
        }
    }

    fn termination(priority: GapPriority) -> &'static str {
        match priority {
            GapPriority::Blocking => conservative::TERMINATION,
            GapPriority::Advisory => "Recorded; does not block delivery",
        }
    }

    fn add_fact(ctx: &mut ProjectContext, text: String) -> Result<()> {
        let claim = Claim::builder(ctx.dossier.claims.next_id(), text.clone(), OriginTag::User)
            .proof_level(ProofLevel::S0)
            .status(ClaimStatus::Pass)
            .build()?;
        ctx.dossier.claims.add(claim)?;
        ctx.facts.push(text);
        Ok(())
    }

    fn add_gap(ctx: &mut ProjectContext, kind: SectionKind, key: &str) -> Result<()> {
        let field = format!("{kind}.{key}");
        let priority = kind.gap_priority();
        let closure = GapClosure::new(
            ctx.dossier.gaps.next_id(),
            format!("{field} is not specified"),
            conservative::DECISION,
            format!("Obtain stakeholder confirmation of {field}"),
            Self::impact(kind),
            Self::termination(priority),
        )?;

        ctx.assumptions
            .push(format!("{}: {} ({})", closure.gap_id, closure.decision, field));

        let claim = Claim::builder(
            ctx.dossier.claims.next_id(),
            closure.description.clone(),
            OriginTag::Gap,
        )
        .testability(Testability::T2)
        .status(ClaimStatus::PendingClosure)
        .test_description(closure.test.clone())
        .gap_closure(closure.clone())
        .build()?;

        ctx.dossier.gaps.add(Gap::new(closure, priority)?.with_field(field))?;
        ctx.dossier.claims.add(claim)?;
        Ok(())
    }

    fn draft(
        ctx: &mut ProjectContext,
        field: &'static str,
        text: String,
        origin: OriginTag,
    ) -> Result<()> {
        let id = ctx.dossier.claims.next_id();
        let builder = Claim::builder(id.clone(), text.clone(), origin);
        let claim = match origin {
            OriginTag::Ded => builder.proof_level(ProofLevel::S1).status(ClaimStatus::Pass),
            _ => builder.status(ClaimStatus::PendingClosure),
        }
        .build()?;
        ctx.dossier.claims.add(claim)?;
        ctx.drafted.push(DraftedField {
            field,
            text,
            claim_id: id.to_string(),
        });
        Ok(())
    }
}

impl Default for ExpandStage {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStage for ExpandStage {
    fn stage(&self) -> Stage {
        Stage::Expand
    }

    fn run(&self, ctx: &mut ProjectContext) -> Result<StageReport> {
        for kind in SectionKind::ALL {
            let entries: Vec<_> = ctx
                .input
                .section(kind)
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            for (key, value) in entries {
                if is_unspecified(&value) {
                    Self::add_gap(ctx, kind, &key)?;
                } else {
                    Self::add_fact(ctx, format!("{kind}.{key}: {}", render_value(&value)))?;
                }
            }
        }

        for integration in ctx.input.integrations.clone() {
            Self::add_fact(ctx, format!("Integration: {integration}"))?;
        }
        for criterion in ctx.input.done_criteria.clone() {
            Self::add_fact(ctx, format!("Done when: {criterion}"))?;
        }

        if ctx.input.goal.as_deref().is_none_or(|g| g.trim().is_empty()) {
            let text = format!("Goal: {}", ctx.input.objective.trim());
            Self::draft(ctx, "goal", text, OriginTag::Ded)?;
        }
        if ctx
            .input
            .deliverable
            .as_deref()
            .is_none_or(|d| d.trim().is_empty())
        {
            let kind = ctx
                .tuning
                .as_ref()
                .map(|t| t.deliverable_type.as_str())
                .unwrap_or("MIXED");
            let text = format!("Deliverable: {kind} artefact answering the objective");
            Self::draft(ctx, "deliverable", text, OriginTag::Hyp)?;
        }
        if ctx.input.done_criteria.is_empty() {
            let text =
                "Done when the recommended option passes its acceptance tests".to_string();
            Self::draft(ctx, "done_criteria", text, OriginTag::Hyp)?;
        }

        debug!(
            facts = ctx.facts.len(),
            gaps = ctx.dossier.gaps.len(),
            drafted = ctx.drafted.len(),
            "expanded input"
        );

        Ok(StageReport::notes(vec![format!(
            "{} fact(s), {} gap(s) ({} blocking), {} drafted field(s)",
            ctx.facts.len(),
            ctx.dossier.gaps.len(),
            ctx.dossier.gaps.blocking().count(),
            ctx.drafted.len()
        )]))
    }
}
