//! Project input: the free-form description a run starts from

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use warrant_domain::{
    Claim, ClaimId, ClaimStatus, ComplexitySignals, DomainError, GapClosure, GapPriority,
    OriginTag, ProofLevel, RiskSignals, SolutionOption, Testability,
};
use warrant_tuner::ParameterOverrides;

/// A section of free-form entries (e.g. `users_load.peak_rps = 1200`)
pub type Section = BTreeMap<String, Value>;

/// Placeholder strings that count as "not specified"
const PLACEHOLDERS: [&str; 4] = ["tbd", "unknown", "?", "n/a"];

/// Whether a section value carries no information
///
/// Null, blank strings, placeholders ("tbd", "unknown", "?", "n/a") and
/// empty lists or tables are unspecified. `false` and `0` are values.
pub fn is_unspecified(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => {
            let s = s.trim();
            s.is_empty() || PLACEHOLDERS.iter().any(|p| s.eq_ignore_ascii_case(p))
        }
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Render a section value for a fact line
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items.iter().map(render_value).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// The sections whose entries become facts or gaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Users and load
    UsersLoad,
    /// Service levels
    SlaSlo,
    /// Data handled
    Data,
    /// Budget, timeline and other constraints
    Constraints,
    /// Security requirements
    Security,
    /// Operations
    Ops,
    /// AI / ML components
    AiMl,
}

impl SectionKind {
    /// All sections in expansion order
    pub const ALL: [SectionKind; 7] = [
        SectionKind::UsersLoad,
        SectionKind::SlaSlo,
        SectionKind::Data,
        SectionKind::Constraints,
        SectionKind::Security,
        SectionKind::Ops,
        SectionKind::AiMl,
    ];

    /// Input key of the section
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::UsersLoad => "users_load",
            SectionKind::SlaSlo => "sla_slo",
            SectionKind::Data => "data",
            SectionKind::Constraints => "constraints",
            SectionKind::Security => "security",
            SectionKind::Ops => "ops",
            SectionKind::AiMl => "ai_ml",
        }
    }

    /// Priority of a gap raised in this section
    pub fn gap_priority(&self) -> GapPriority {
        match self {
            SectionKind::Ops | SectionKind::AiMl => GapPriority::Advisory,
            _ => GapPriority::Blocking,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signals declared by the user, OR-ed with the detected ones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclaredSignals {
    /// Risk signals
    pub risk: RiskSignals,
    /// Complexity signals
    pub complexity: ComplexitySignals,
    /// At least one important claim or non-trivial decision
    pub has_important_claims: bool,
}

/// A claim supplied with the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimInput {
    /// Explicit id; assigned sequentially when absent
    #[serde(default)]
    pub id: Option<String>,
    /// The assertion
    pub text: String,
    /// Origin tag
    pub origin: OriginTag,
    /// Proof level
    #[serde(default)]
    pub proof_level: ProofLevel,
    /// Testability
    #[serde(default)]
    pub testability: Testability,
    /// Status
    #[serde(default)]
    pub status: ClaimStatus,
    /// Ids of claims this one depends on
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// How the claim is tested
    #[serde(default)]
    pub test: Option<String>,
    /// Closure, mandatory for GAP claims
    #[serde(default)]
    pub gap_closure: Option<GapClosure>,
    /// Priority of the gap a GAP claim opens; blocking when absent
    #[serde(default)]
    pub gap_priority: Option<GapPriority>,
}

impl ClaimInput {
    /// Build the claim, falling back to `fallback_id` when no id was given
    pub fn into_claim(self, fallback_id: ClaimId) -> std::result::Result<Claim, DomainError> {
        let id = self.id.map(ClaimId::new).unwrap_or(fallback_id);
        let mut builder = Claim::builder(id, self.text, self.origin)
            .proof_level(self.proof_level)
            .testability(self.testability)
            .status(self.status)
            .dependencies(self.dependencies.into_iter().map(ClaimId::new).collect());
        if let Some(test) = self.test {
            builder = builder.test_description(test);
        }
        if let Some(closure) = self.gap_closure {
            builder = builder.gap_closure(closure);
        }
        builder.build()
    }
}

/// Everything a run is given
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInput {
    /// Objective in one to three sentences
    pub objective: String,
    /// Goal; drafted from the objective when absent
    pub goal: Option<String>,
    /// Expected deliverable; drafted as a hypothesis when absent
    pub deliverable: Option<String>,
    /// Users and load
    pub users_load: Section,
    /// Service levels
    pub sla_slo: Section,
    /// Data handled
    pub data: Section,
    /// Constraints (budget, timeline, ...)
    pub constraints: Section,
    /// External systems to integrate with
    pub integrations: Vec<String>,
    /// Operations
    pub ops: Section,
    /// Security requirements
    pub security: Section,
    /// AI / ML components
    pub ai_ml: Section,
    /// Acceptance criteria; drafted as a hypothesis when empty
    pub done_criteria: Vec<String>,
    /// Declared signals
    pub signals: DeclaredSignals,
    /// Claims supplied by the user
    pub claims: Vec<ClaimInput>,
    /// Candidate options; generated from templates when empty
    pub options: Vec<SolutionOption>,
    /// Parameter overrides
    pub overrides: ParameterOverrides,
}

impl ProjectInput {
    /// Create an input with only an objective
    pub fn new(objective: impl Into<String>) -> Self {
        Self {
            objective: objective.into(),
            ..Default::default()
        }
    }

    /// Load an input from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PipelineError::InvalidInput(format!("Failed to parse JSON: {}", e)))
    }

    /// Load an input from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| PipelineError::InvalidInput(format!("Failed to parse TOML: {}", e)))
    }

    /// Structural checks: non-blank objective, unique and in-range options,
    /// valid overrides
    pub fn validate(&self) -> Result<()> {
        if self.objective.trim().is_empty() {
            return Err(PipelineError::InvalidInput(
                "objective must not be blank".to_string(),
            ));
        }

        let mut seen = BTreeSet::new();
        for option in &self.options {
            if !seen.insert(option.id.as_str()) {
                return Err(DomainError::DuplicateOption(option.id.to_string()).into());
            }
            option.validate()?;
        }

        self.overrides.validate()?;
        Ok(())
    }

    /// Entries of a section
    pub fn section(&self, kind: SectionKind) -> &Section {
        match kind {
            SectionKind::UsersLoad => &self.users_load,
            SectionKind::SlaSlo => &self.sla_slo,
            SectionKind::Data => &self.data,
            SectionKind::Constraints => &self.constraints,
            SectionKind::Security => &self.security,
            SectionKind::Ops => &self.ops,
            SectionKind::AiMl => &self.ai_ml,
        }
    }

    /// Whether a section has at least one specified entry
    pub fn has_specified(&self, kind: SectionKind) -> bool {
        self.section(kind).values().any(|v| !is_unspecified(v))
    }

    /// Specified value of a constraint, if any
    pub fn constraint(&self, key: &str) -> Option<&Value> {
        self.constraints.get(key).filter(|v| !is_unspecified(v))
    }

    /// The goal, or the objective when no goal was given
    pub fn goal_text(&self) -> &str {
        self.goal
            .as_deref()
            .filter(|g| !g.trim().is_empty())
            .unwrap_or(&self.objective)
    }

    /// Every string in the input, for phrase scanning
    pub fn full_text(&self) -> String {
        let mut parts = vec![self.objective.clone()];
        parts.extend(self.goal.clone());
        parts.extend(self.deliverable.clone());
        for kind in SectionKind::ALL {
            for (key, value) in self.section(kind) {
                parts.push(format!("{key} {}", render_value(value)));
            }
        }
        parts.extend(self.integrations.iter().cloned());
        parts.extend(self.done_criteria.iter().cloned());
        parts.extend(self.claims.iter().map(|c| c.text.clone()));
        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unspecified_values() {
        assert!(is_unspecified(&Value::Null));
        assert!(is_unspecified(&json!("")));
        assert!(is_unspecified(&json!("  TBD ")));
        assert!(is_unspecified(&json!("?")));
        assert!(is_unspecified(&json!([])));
        assert!(is_unspecified(&json!({})));
        assert!(!is_unspecified(&json!(0)));
        assert!(!is_unspecified(&json!(false)));
        assert!(!is_unspecified(&json!("1200 rps")));
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!(" 99.9% ")), "99.9%");
        assert_eq!(render_value(&json!(["eu", "us"])), "eu, us");
        assert_eq!(render_value(&json!(1200)), "1200");
    }

    #[test]
    fn test_from_toml() {
        let input = ProjectInput::from_toml(
            r#"
            objective = "Move the billing service to a managed database"
            integrations = ["Stripe"]

            [users_load]
            peak_rps = 1200
            regions = "tbd"

            [signals.risk]
            financial = true

            [overrides]
            repair_max = 3
            "#,
        )
        .unwrap();
        assert!(input.validate().is_ok());
        assert!(input.has_specified(SectionKind::UsersLoad));
        assert!(!input.has_specified(SectionKind::Security));
        assert!(input.signals.risk.financial);
        assert_eq!(input.overrides.repair_max, Some(3));
    }

    #[test]
    fn test_blank_objective_rejected() {
        let input = ProjectInput::new("   ");
        assert!(matches!(
            input.validate(),
            Err(PipelineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_duplicate_option_rejected() {
        let input = ProjectInput::from_json(
            r#"{
                "objective": "Pick a queue",
                "options": [
                    {"id": "O1", "name": "Kafka"},
                    {"id": "O1", "name": "RabbitMQ"}
                ]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            input.validate(),
            Err(PipelineError::Rejected(DomainError::DuplicateOption(_)))
        ));
    }

    #[test]
    fn test_claim_input_gap_without_closure() {
        let claim = ClaimInput {
            id: None,
            text: "Peak load is unknown".to_string(),
            origin: OriginTag::Gap,
            proof_level: ProofLevel::S0,
            testability: Testability::T2,
            status: ClaimStatus::PendingClosure,
            dependencies: Vec::new(),
            test: None,
            gap_closure: None,
            gap_priority: None,
        };
        assert!(matches!(
            claim.into_claim(ClaimId::sequential(1)),
            Err(DomainError::MissingGapClosure(_))
        ));
    }

    #[test]
    fn test_goal_falls_back_to_objective() {
        let mut input = ProjectInput::new("Ship the export API");
        assert_eq!(input.goal_text(), "Ship the export API");
        input.goal = Some("Let customers export invoices".to_string());
        assert_eq!(input.goal_text(), "Let customers export invoices");
    }
}
