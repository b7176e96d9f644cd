//! Evidence-lookup trigger detection

use std::sync::LazyLock;
use warrant_domain::lexicon::KeywordSet;
use warrant_domain::{RiskClass, Trigger};

static RECENCY: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "latest",
        "current",
        "price",
        "prices",
        "cost",
        "law",
        "laws",
        "regulation",
        "version",
        "news",
        "recent",
        "today",
        "market",
    ])
});

static NICHE: LazyLock<KeywordSet> = LazyLock::new(|| {
    KeywordSet::new(&[
        "specialized",
        "specific",
        "technical",
        "expert",
        "advanced",
        "detailed",
        "precise",
    ])
});

/// Triggers that fire for an objective under a risk class, in a fixed order
pub fn detect_triggers(objective: &str, risk: RiskClass) -> Vec<Trigger> {
    let mut fired = Vec::new();
    if RECENCY.is_match(objective) {
        fired.push(Trigger::Recency);
    }
    if NICHE.is_match(objective) {
        fired.push(Trigger::Niche);
    }
    if risk == RiskClass::R2 {
        fired.push(Trigger::HighRisk);
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recency() {
        let fired = detect_triggers("Compare the latest managed Postgres prices", RiskClass::R1);
        assert_eq!(fired, vec![Trigger::Recency]);
    }

    #[test]
    fn test_niche_and_high_risk() {
        let fired = detect_triggers("An expert review of the ledger", RiskClass::R2);
        assert_eq!(fired, vec![Trigger::Niche, Trigger::HighRisk]);
    }

    #[test]
    fn test_high_risk_only_for_r2() {
        assert!(detect_triggers("Plain objective", RiskClass::R3).is_empty());
        assert!(detect_triggers("Plain objective", RiskClass::R1).is_empty());
    }
}
