//! End-to-end runs of the review pipeline

use serde_json::json;
use warrant_domain::{
    ClaimStatus, Evidence, EvidenceProvider, EvidenceRequest, GapClosure, OptionKind, OriginTag,
    ProofLevel, RiskClass, ScoreVector, SolutionOption, Stage, TerminationCode, Testability,
    Trigger,
};
use warrant_gatekeeper::FindingKind;
use warrant_pipeline::{ClaimInput, Pipeline, PipelineConfig, ProjectInput};

fn create_low_risk_input() -> ProjectInput {
    let mut input = ProjectInput::new("Choose a host for the team wiki");
    input.goal = Some("Give the support team one place for runbooks".to_string());
    input.deliverable = Some("Hosting recommendation".to_string());
    input.users_load.insert("editors".to_string(), json!(40));
    input
        .sla_slo
        .insert("availability".to_string(), json!("business hours"));
    input
        .data
        .insert("content".to_string(), json!("internal runbooks"));
    input
        .constraints
        .insert("timeline".to_string(), json!("end of quarter"));
    input.ops.insert("owner".to_string(), json!("support lead"));
    input.integrations = vec!["Slack".to_string()];
    input.done_criteria = vec!["Editors can publish a page".to_string()];
    input.options = vec![
        SolutionOption::new(
            "O1",
            "Hosted wiki service",
            OptionKind::External,
            ScoreVector::from_array([4, 4, 5, 3, 4, 5, 5, 4]),
        )
        .unwrap(),
        SolutionOption::new(
            "O2",
            "Self-hosted wiki",
            OptionKind::Internal,
            ScoreVector::from_array([3, 3, 3, 4, 3, 3, 2, 3]),
        )
        .unwrap(),
        SolutionOption::new(
            "O3",
            "Static site from a repository",
            OptionKind::Internal,
            ScoreVector::from_array([4, 5, 3, 5, 5, 3, 3, 4]),
        )
        .unwrap(),
    ];
    input
}

fn create_financial_input() -> ProjectInput {
    let mut input = ProjectInput::new("Move invoice processing to a managed queue");
    input.signals.risk.financial = true;
    input.goal = Some("Stop losing invoices during deploys".to_string());
    input.deliverable = Some("Migration recommendation".to_string());
    input.done_criteria = vec!["No invoice lost over one month".to_string()];
    input.users_load.insert("peak_rps".to_string(), json!("tbd"));
    input
}

#[test]
fn test_financial_without_security_is_protocol() {
    let record = Pipeline::default().run(create_financial_input()).unwrap();

    assert_eq!(record.risk_class, RiskClass::R2);
    assert_eq!(record.open_questions.len(), 1);
    let gap = &record.open_questions[0];
    assert_eq!(gap.field.as_deref(), Some("users_load.peak_rps"));
    assert!(gap.is_terminal());

    let gap_claim = record
        .claims
        .iter()
        .find(|c| c.is_gap())
        .expect("gap claim recorded");
    let lint = record.validation.stage(Stage::Lint).unwrap();
    let final_gate = lint.final_gate().unwrap();
    assert!(!final_gate.passed());
    assert!(final_gate.issues().iter().any(|f| {
        f.kind == FindingKind::OpenHighRiskGap
            && f.subject.as_deref() == Some(gap_claim.id.as_str())
    }));
    assert!(lint.degraded);
    // COMPLEX profile: three repair attempts before degrading
    assert_eq!(lint.repair.as_ref().unwrap().attempts, 3);

    let stress = record.validation.stage(Stage::Stress).unwrap();
    assert!(stress
        .final_gate()
        .unwrap()
        .issues()
        .iter()
        .any(|f| f.kind == FindingKind::MissingGuardrails));

    assert_eq!(record.termination, TerminationCode::Protocol);
    assert_eq!(record.next_step, TerminationCode::Protocol.next_step());
}

#[test]
fn test_closing_the_gap_clears_lint() {
    let mut input = create_financial_input();
    input.users_load.insert("peak_rps".to_string(), json!(80));

    let record = Pipeline::default().run(input).unwrap();
    assert!(record.open_questions.is_empty());
    assert!(!record.validation.gate_failed(Stage::Lint));
    // Security is still unspecified for R2 work
    assert!(record.validation.gate_failed(Stage::Stress));
    assert_eq!(record.termination, TerminationCode::Partial);
}

#[test]
fn test_illegal_is_refused() {
    let mut input = create_low_risk_input();
    input.signals.risk.illegal = true;

    let record = Pipeline::default().run(input).unwrap();
    assert_eq!(record.risk_class, RiskClass::R3);
    assert_eq!(record.termination, TerminationCode::Refused);
    assert!(record.recommendation.is_none());
    assert!(record.fallback.is_none());
    assert!(record.options.is_empty());
    assert!(record
        .validation
        .stop_rules
        .iter()
        .any(|r| r.starts_with("STOP")));
    assert_eq!(record.validation.stages.len(), Stage::ALL.len());
}

#[test]
fn test_fully_specified_low_risk_is_delivered() {
    let record = Pipeline::default().run(create_low_risk_input()).unwrap();

    assert_eq!(record.risk_class, RiskClass::R1);
    assert!(record.open_questions.is_empty());
    assert!(record.drafted.is_empty());
    assert!(record.validation.degraded_stages().is_empty());
    assert_eq!(record.termination, TerminationCode::Delivered);

    // O1 = 34, O3 = 32, O2 = 24
    assert_eq!(record.recommendation.as_ref().unwrap().id.as_str(), "O1");
    assert_eq!(record.fallback.as_ref().unwrap().id.as_str(), "O3");
    assert_eq!(record.runbook.len(), 3);
    assert_eq!(record.next_step, TerminationCode::Delivered.next_step());
    assert_eq!(record.facts.len(), 7);
}

#[test]
fn test_user_gap_claim_blocks_delivery() {
    let mut input = create_low_risk_input();
    input.claims.push(ClaimInput {
        id: None,
        text: "Retention period for archived pages".to_string(),
        origin: OriginTag::Gap,
        proof_level: ProofLevel::S0,
        testability: Testability::T2,
        status: ClaimStatus::PendingClosure,
        dependencies: Vec::new(),
        test: Some("Ask the support lead for the retention period".to_string()),
        gap_closure: Some(GapClosure::conservative(
            "GAP-RETENTION",
            "Retention period for archived pages",
        )),
        gap_priority: None,
    });

    let record = Pipeline::default().run(input).unwrap();
    assert_eq!(record.open_questions.len(), 1);
    assert_eq!(record.open_questions[0].id(), "GAP-RETENTION");
    assert!(record.open_questions[0].is_terminal());
    assert!(record.assumptions[0].starts_with("GAP-RETENTION: "));
    assert_eq!(record.termination, TerminationCode::Protocol);
}

#[test]
fn test_supplied_options_are_bounded() {
    let mut input = create_low_risk_input();
    for (id, name) in [("O4", "Shared drive"), ("O5", "Chat pinned messages")] {
        input.options.push(
            SolutionOption::new(
                id,
                name,
                OptionKind::Internal,
                ScoreVector::from_array([2, 2, 4, 5, 2, 4, 3, 1]),
            )
            .unwrap(),
        );
    }

    let record = Pipeline::default().run(input).unwrap();
    let ids: Vec<_> = record.options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["O1", "O2", "O3"]);
    let branch = record.validation.stage(Stage::Branch).unwrap();
    assert!(branch.notes.iter().any(|n| n == "dropped option(s): O4, O5"));
    assert_eq!(record.termination, TerminationCode::Delivered);
}

#[test]
fn test_r3_is_never_downgraded() {
    let mut input = create_low_risk_input();
    input.signals.risk.dangerous = true;
    input.overrides.moderation = Some(warrant_tuner::Moderation::Off);
    input.overrides.auto_correct = Some(false);

    let record = Pipeline::new(PipelineConfig::permissive()).run(input).unwrap();
    assert_eq!(record.tuning.risk_class, RiskClass::R3);
    assert_eq!(record.risk_class, RiskClass::R3);
    assert_eq!(record.termination, TerminationCode::Refused);
    assert!(record.proof_budget.is_stop());
}

struct PricingLookup;

impl EvidenceProvider for PricingLookup {
    type Error = String;

    fn fetch(&self, request: &EvidenceRequest) -> Result<Option<Evidence>, String> {
        match request.trigger {
            Trigger::Recency => Ok(Some(Evidence {
                summary: "Managed wikis start at 5 USD per editor per month".to_string(),
                source: "vendor pricing page".to_string(),
            })),
            _ => Err("service unavailable".to_string()),
        }
    }
}

#[test]
fn test_evidence_collaborator() {
    let mut input = create_low_risk_input();
    input.objective = "Choose a host for the team wiki at current prices".to_string();
    input.signals.risk.financial = true;

    let record = Pipeline::with_provider(PipelineConfig::default(), PricingLookup)
        .run(input)
        .unwrap();

    let triggers = &record.validation.triggers;
    let recency = triggers.iter().find(|t| t.trigger == Trigger::Recency).unwrap();
    assert!(recency.fired && recency.evidence_supplied);
    let high_risk = triggers.iter().find(|t| t.trigger == Trigger::HighRisk).unwrap();
    assert!(high_risk.fired && !high_risk.evidence_supplied);

    assert_eq!(record.statistics.by_proof_level.get(&ProofLevel::S2), Some(&1));
    let stress = record.validation.stage(Stage::Stress).unwrap();
    assert!(stress
        .final_gate()
        .unwrap()
        .warnings()
        .iter()
        .any(|f| f.kind == FindingKind::UnsupportedTrigger));
}

#[test]
fn test_record_serializes() {
    let record = Pipeline::default().run(create_low_risk_input()).unwrap();
    let json = record.to_json().unwrap();
    assert!(json.contains("\"termination\": \"DELIVERED\""));
    assert!(json.contains("\"run_id\""));
}

#[test]
fn test_toml_input() {
    let input = ProjectInput::from_toml(
        r#"
        objective = "Pick a CI service for the mobile repo"
        deliverable = "ADR"

        [constraints]
        budget = "?"

        [overrides]
        divergence = "low"
        unknown_knob = true
        "#,
    )
    .unwrap();

    let record = Pipeline::default().run(input).unwrap();
    assert_eq!(record.open_questions.len(), 1);
    assert_eq!(record.options.len(), 2);
    assert_eq!(record.tuning.ignored_overrides, vec!["unknown_knob".to_string()]);
    assert_eq!(record.termination, TerminationCode::Protocol);
}
