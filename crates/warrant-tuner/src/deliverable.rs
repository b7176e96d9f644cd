//! Lexical classification of the expected deliverable

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use warrant_domain::lexicon::KeywordSet;

/// Kind of artefact the run is expected to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliverableType {
    /// Repository, code, CI or infrastructure
    RepoCode,
    /// Documentation
    Doc,
    /// Decision record or recommendation
    Decision,
    /// Audit or review
    Audit,
    /// Plan or roadmap
    Plan,
    /// No single dominant kind
    Mixed,
}

static CODE: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "repo", "code", "ci", "workflow", "yaml", "package", "cli", "infra", "api", "implement",
    ])
});

static DOC: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&["documentation", "guide", "spec", "readme", "doc", "docs"])
});

static DECISION: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "decision",
        "choice",
        "recommendation",
        "adr",
        "choose",
        "select",
    ])
});

static AUDIT: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&["audit", "review", "assessment", "analysis", "evaluate"])
});

static PLAN: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&["plan", "roadmap", "timeline", "schedule", "strategy"])
});

impl DeliverableType {
    /// Classify from the objective and the deliverable description
    ///
    /// Exactly one bucket with hits yields that bucket; none or several
    /// yield MIXED.
    pub fn classify(objective: &str, deliverable: &str) -> Self {
        let text = format!("{objective} {deliverable}");
        let buckets: [(DeliverableType, &KeywordSet); 5] = [
            (DeliverableType::RepoCode, &CODE),
            (DeliverableType::Doc, &DOC),
            (DeliverableType::Decision, &DECISION),
            (DeliverableType::Audit, &AUDIT),
            (DeliverableType::Plan, &PLAN),
        ];

        let mut hits = buckets
            .iter()
            .filter(|(_, set)| set.is_match(&text))
            .map(|(kind, _)| *kind);

        match (hits.next(), hits.next()) {
            (Some(kind), None) => kind,
            _ => DeliverableType::Mixed,
        }
    }

    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliverableType::RepoCode => "REPO-CODE",
            DeliverableType::Doc => "DOC",
            DeliverableType::Decision => "DECISION",
            DeliverableType::Audit => "AUDIT",
            DeliverableType::Plan => "PLAN",
            DeliverableType::Mixed => "MIXED",
        }
    }

    /// Whether code artefacts are expected
    pub fn wants_code(&self) -> bool {
        matches!(self, DeliverableType::RepoCode | DeliverableType::Mixed)
    }
}

impl fmt::Display for DeliverableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bucket() {
        assert_eq!(
            DeliverableType::classify("Set up the CI workflow", "a repo"),
            DeliverableType::RepoCode
        );
        assert_eq!(
            DeliverableType::classify("Write the onboarding guide", ""),
            DeliverableType::Doc
        );
        assert_eq!(
            DeliverableType::classify("Security audit of the gateway", ""),
            DeliverableType::Audit
        );
        assert_eq!(
            DeliverableType::classify("Quarterly roadmap", ""),
            DeliverableType::Plan
        );
        assert_eq!(
            DeliverableType::classify("Pick a database", "ADR"),
            DeliverableType::Decision
        );
    }

    #[test]
    fn test_no_hits_is_mixed() {
        assert_eq!(
            DeliverableType::classify("Something vague", ""),
            DeliverableType::Mixed
        );
    }

    #[test]
    fn test_several_buckets_is_mixed() {
        assert_eq!(
            DeliverableType::classify("Implement the API and write its documentation", ""),
            DeliverableType::Mixed
        );
    }

    #[test]
    fn test_whole_word_only() {
        // "specific" must not hit "spec", "cinema" must not hit "ci"
        assert_eq!(
            DeliverableType::classify("A specific cinema roadmap", ""),
            DeliverableType::Plan
        );
    }

    #[test]
    fn test_wants_code() {
        assert!(DeliverableType::RepoCode.wants_code());
        assert!(DeliverableType::Mixed.wants_code());
        assert!(!DeliverableType::Doc.wants_code());
    }
}
