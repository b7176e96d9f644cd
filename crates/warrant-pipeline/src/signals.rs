//! Risk and complexity signals detected from the raw input
//!
//! Detection is lexical and whole-word. Declared signals are OR-ed in, so
//! detection can only add signals, never clear one.

use crate::input::{is_unspecified, render_value, ProjectInput, Section, SectionKind};
use std::sync::LazyLock;
use warrant_domain::lexicon::{KeywordSet, IMPORTANCE};
use warrant_domain::{ComplexitySignals, RiskSignals};

static FINANCIAL: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "cost", "costs", "billing", "payment", "payments", "pricing", "invoice", "invoices",
    ])
});

static LEGAL: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&["gdpr", "hipaa", "pci", "legal", "compliance", "regulatory"])
});

static SECURITY: LazyLock<KeywordSet> = LazyLock::new(|| KeywordSet::new(&["security"]));

static HEALTH: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(&["health", "medical", "clinical", "patient", "patients"]));

static PII: LazyLock<KeywordSet> =
    LazyLock::new(|| KeywordSet::new(&["pii", "personal", "personally identifiable"]));

static REPO_CI_DOCS: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "repo",
        "repository",
        "ci",
        "pipeline",
        "docs",
        "documentation",
        "code",
    ])
});

static AUTH_PAYMENT_STORAGE_API: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "auth",
        "authentication",
        "login",
        "sso",
        "payment",
        "payments",
        "storage",
        "database",
        "api",
    ])
});

static COMPLIANCE_SENSITIVE: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&["compliance", "sensitive", "gdpr", "hipaa", "pci", "encryption"])
});

static PRODUCTION_CRITICAL: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "production",
        "prod",
        "business-critical",
        "mission-critical",
        "critical",
    ])
});

/// Signals derived for one input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivedSignals {
    /// Risk signals
    pub risk: RiskSignals,
    /// Complexity signals
    pub complexity: ComplexitySignals,
    /// At least one important claim or decision
    pub has_important_claims: bool,
}

fn section_text(section: &Section) -> String {
    section
        .iter()
        .filter(|(_, v)| !is_unspecified(v))
        .map(|(k, v)| format!("{k} {}", render_value(v)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Risk signals detected from the input (declared ones not included)
pub fn detect_risk(input: &ProjectInput) -> RiskSignals {
    let headline = format!("{}\n{}", input.objective, input.goal.as_deref().unwrap_or(""));
    let constraints = section_text(&input.constraints);

    RiskSignals {
        financial: input.constraint("budget").is_some() || FINANCIAL.is_match(&headline),
        legal: LEGAL.is_match(&constraints),
        security: input.has_specified(SectionKind::Security) || SECURITY.is_match(&headline),
        health: HEALTH.is_match(&headline),
        pii: PII.is_match(&section_text(&input.data)),
        illegal: false,
        dangerous: false,
    }
}

/// Complexity signals detected from the input (declared ones not included)
pub fn detect_complexity(input: &ProjectInput) -> ComplexitySignals {
    let headline = format!(
        "{}\n{}\n{}",
        input.objective,
        input.goal.as_deref().unwrap_or(""),
        input.deliverable.as_deref().unwrap_or("")
    );
    let everything = format!(
        "{headline}\n{}\n{}",
        section_text(&input.constraints),
        section_text(&input.data)
    );

    ComplexitySignals {
        repo_ci_docs: REPO_CI_DOCS.is_match(&headline),
        auth_payment_storage_api: !input.integrations.is_empty()
            || AUTH_PAYMENT_STORAGE_API.is_match(&headline),
        security_compliance_data: input.has_specified(SectionKind::Security)
            || COMPLIANCE_SENSITIVE.is_match(&everything),
        performance_load_sla: input.has_specified(SectionKind::UsersLoad)
            || input.has_specified(SectionKind::SlaSlo),
        production_critical: PRODUCTION_CRITICAL.is_match(&headline),
    }
}

/// Declared signals OR-ed with the detected ones
pub fn derive_signals(input: &ProjectInput) -> DerivedSignals {
    let declared = &input.signals;
    let headline = format!("{}\n{}", input.objective, input.goal.as_deref().unwrap_or(""));
    let important = declared.has_important_claims
        || IMPORTANCE.is_match(&headline)
        || input.claims.iter().any(|c| IMPORTANCE.is_match(&c.text));

    DerivedSignals {
        risk: declared.risk.merge(&detect_risk(input)),
        complexity: declared.complexity.merge(&detect_complexity(input)),
        has_important_claims: important,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_budget_constraint_is_financial() {
        let mut input = ProjectInput::new("Host the team wiki");
        input.constraints.insert("budget".to_string(), json!("500 EUR/month"));
        assert!(detect_risk(&input).financial);

        input.constraints.insert("budget".to_string(), json!("tbd"));
        assert!(!detect_risk(&input).financial);
    }

    #[test]
    fn test_headline_keywords() {
        let input = ProjectInput::new("Cut the payment latency of the clinical portal");
        let risk = detect_risk(&input);
        assert!(risk.financial);
        assert!(risk.health);
        assert!(!risk.security);
    }

    #[test]
    fn test_legal_and_pii_from_sections() {
        let mut input = ProjectInput::new("Store customer records");
        input.constraints.insert("regime".to_string(), json!("GDPR"));
        input.data.insert("kind".to_string(), json!("personal contact details"));
        let risk = detect_risk(&input);
        assert!(risk.legal);
        assert!(risk.pii);
    }

    #[test]
    fn test_security_section() {
        let mut input = ProjectInput::new("Host the team wiki");
        input.security.insert("auth".to_string(), json!(""));
        assert!(!detect_risk(&input).security);
        input.security.insert("auth".to_string(), json!("SSO"));
        assert!(detect_risk(&input).security);
    }

    #[test]
    fn test_complexity_detection() {
        let mut input = ProjectInput::new("Set up CI for the production API");
        input.users_load.insert("peak_rps".to_string(), json!(300));
        let complexity = detect_complexity(&input);
        assert!(complexity.repo_ci_docs);
        assert!(complexity.auth_payment_storage_api);
        assert!(complexity.performance_load_sla);
        assert!(complexity.production_critical);
        assert!(!complexity.security_compliance_data);
        assert_eq!(complexity.score(), 4);
    }

    #[test]
    fn test_declared_signals_are_kept() {
        let mut input = ProjectInput::new("Host the team wiki");
        input.signals.risk.illegal = true;
        input.signals.has_important_claims = true;
        let derived = derive_signals(&input);
        assert!(derived.risk.illegal);
        assert!(derived.has_important_claims);
    }

    #[test]
    fn test_importance_from_objective() {
        let input = ProjectInput::new("Architecture decision for the event store");
        assert!(derive_signals(&input).has_important_claims);
    }
}
