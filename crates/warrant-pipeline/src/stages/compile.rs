use super::{PipelineStage, StageReport};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::input::render_value;
use crate::record::TriggerRecord;
use tracing::{debug, warn};
use warrant_domain::{
    Claim, ClaimStatus, EvidenceProvider, EvidenceRequest, OriginTag, ProofLevel, RiskClass,
    Stage, Testability, Trigger,
};
use warrant_tuner::detect_triggers;

const ALL_TRIGGERS: [Trigger; 3] = [Trigger::Recency, Trigger::Niche, Trigger::HighRisk];

/// COMPILE: risk class, proof budget, review modules, triggers, stop rules
pub struct CompileStage<'a, P: ?Sized> {
    provider: &'a P,
}

impl<'a, P: EvidenceProvider + ?Sized> CompileStage<'a, P> {
    /// Create the stage with an evidence collaborator
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    fn active_modules(ctx: &ProjectContext) -> Vec<String> {
        let mut modules = vec!["CLARIFIER", "ARCHITECT", "SECURITY"];
        if !ctx.input.ai_ml.is_empty() {
            modules.push("AIML");
        }
        modules.push("VERIFIER");
        modules.into_iter().map(String::from).collect()
    }

    fn stop_rules(ctx: &ProjectContext) -> Vec<String> {
        let mut rules = Vec::new();
        if let Some(budget) = ctx.input.constraint("budget") {
            rules.push(format!("Budget constraint: {}", render_value(budget)));
        }
        if let Some(timeline) = ctx.input.constraint("timeline") {
            rules.push(format!("Timeline constraint: {}", render_value(timeline)));
        }
        if ctx.is_stop() {
            rules.push(format!("STOP: {} has no admissible proof level", ctx.risk));
        }
        rules
    }

    fn fetch(&self, trigger: Trigger, query: &str) -> Option<warrant_domain::Evidence> {
        let request = EvidenceRequest {
            trigger,
            query: query.to_string(),
        };
        match self.provider.fetch(&request) {
            Ok(evidence) => evidence,
            Err(e) => {
                warn!(
                    trigger = %trigger,
                    error = %e,
                    "evidence lookup failed, recording no evidence"
                );
                None
            }
        }
    }
}

impl<P: EvidenceProvider + ?Sized> PipelineStage for CompileStage<'_, P> {
    fn stage(&self) -> Stage {
        Stage::Compile
    }

    fn run(&self, ctx: &mut ProjectContext) -> Result<StageReport> {
        ctx.escalate_risk(RiskClass::classify(&ctx.signals.risk));

        let fired = detect_triggers(&ctx.input.objective, ctx.risk);
        let mut triggers = Vec::new();
        for trigger in ALL_TRIGGERS {
            let is_fired = fired.contains(&trigger);
            let evidence = if is_fired && ctx.parameters.auto_tools {
                self.fetch(trigger, &ctx.input.objective)
            } else {
                None
            };

            if let Some(evidence) = &evidence {
                let claim = Claim::builder(
                    ctx.dossier.claims.next_id(),
                    format!("{}: {}", trigger, evidence.summary),
                    OriginTag::Ded,
                )
                .proof_level(ProofLevel::S2)
                .testability(Testability::T2)
                .status(ClaimStatus::Pass)
                .test_description(format!("Check against {}", evidence.source))
                .build()?;
                ctx.dossier.claims.add(claim)?;
            }

            triggers.push(TriggerRecord {
                trigger,
                fired: is_fired,
                evidence_supplied: evidence.is_some(),
                evidence,
            });
        }

        let modules = Self::active_modules(ctx);
        let stop_rules = Self::stop_rules(ctx);
        debug!(
            risk = %ctx.risk,
            modules = modules.len(),
            stop_rules = stop_rules.len(),
            "compiled run"
        );

        let notes = vec![
            format!("risk class {}", ctx.risk),
            format!("modules: {}", modules.join(", ")),
        ];
        ctx.validation.active_modules = modules;
        ctx.validation.triggers = triggers;
        ctx.validation.stop_rules = stop_rules;
        Ok(StageReport::notes(notes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ProjectInput;
    use serde_json::json;
    use warrant_domain::{Evidence, NoEvidence};

    struct FixedEvidence;

    impl EvidenceProvider for FixedEvidence {
        type Error = String;

        fn fetch(
            &self,
            request: &EvidenceRequest,
        ) -> std::result::Result<Option<Evidence>, String> {
            match request.trigger {
                Trigger::Recency => Ok(Some(Evidence {
                    summary: "Managed Postgres starts at 15 USD per month".to_string(),
                    source: "vendor pricing page".to_string(),
                })),
                _ => Err("lookup timed out".to_string()),
            }
        }
    }

    #[test]
    fn test_modules_and_stop_rules() {
        let mut input = ProjectInput::new("Host the team wiki");
        input.constraints.insert("timeline".to_string(), json!("Q3"));
        input.ai_ml.insert("model".to_string(), json!("summarizer"));
        let mut ctx = ProjectContext::new(input).unwrap();

        CompileStage::new(&NoEvidence).run(&mut ctx).unwrap();
        assert_eq!(
            ctx.validation.active_modules,
            vec!["CLARIFIER", "ARCHITECT", "SECURITY", "AIML", "VERIFIER"]
        );
        assert_eq!(ctx.validation.stop_rules, vec!["Timeline constraint: Q3"]);
        assert!(ctx.validation.triggers.iter().all(|t| !t.fired));
    }

    #[test]
    fn test_r3_adds_stop_rule() {
        let mut input = ProjectInput::new("Host the team wiki");
        input.signals.risk.dangerous = true;
        let mut ctx = ProjectContext::new(input).unwrap();
        CompileStage::new(&NoEvidence).run(&mut ctx).unwrap();
        assert_eq!(ctx.risk, RiskClass::R3);
        assert!(ctx.validation.stop_rules.iter().any(|r| r.starts_with("STOP")));
    }

    #[test]
    fn test_evidence_becomes_s2_claim() {
        let mut input = ProjectInput::new("Compare the latest managed Postgres prices");
        input.signals.risk.financial = true;
        let mut ctx = ProjectContext::new(input).unwrap();
        ctx.escalate_risk(RiskClass::R2);

        CompileStage::new(&FixedEvidence).run(&mut ctx).unwrap();

        let recency = &ctx.validation.triggers[0];
        assert!(recency.fired && recency.evidence_supplied);
        // The failing collaborator is recorded as no evidence
        let high_risk = &ctx.validation.triggers[2];
        assert!(high_risk.fired && !high_risk.evidence_supplied);

        assert_eq!(ctx.dossier.claims.len(), 1);
        let claim = ctx.dossier.claims.iter().next().unwrap();
        assert_eq!(claim.origin, OriginTag::Ded);
        assert_eq!(claim.proof_level, ProofLevel::S2);
    }

    #[test]
    fn test_auto_tools_off_skips_lookup() {
        let mut ctx =
            ProjectContext::new(ProjectInput::new("Compare the latest Postgres prices")).unwrap();
        ctx.parameters.auto_tools = false;
        CompileStage::new(&FixedEvidence).run(&mut ctx).unwrap();
        assert!(ctx.validation.triggers[0].fired);
        assert!(!ctx.validation.triggers[0].evidence_supplied);
        assert!(ctx.dossier.claims.is_empty());
    }
}
