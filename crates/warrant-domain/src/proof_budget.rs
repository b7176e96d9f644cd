//! Minimum evidentiary bar per risk class

use crate::risk::RiskClass;
use crate::tag::ProofLevel;
use serde::Serialize;

/// Proof requirements for one risk class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProofBudget {
    /// Risk class the budget applies to
    pub risk_class: RiskClass,
    /// Proof levels that satisfy the budget
    pub required_levels: &'static [ProofLevel],
    /// Minimum number of independent supporting claims
    pub minimum_pillars: usize,
    /// Whether at least two alternatives must be compared
    pub requires_alternatives: bool,
    /// Whether guardrails (security, operations) must be stated
    pub requires_guardrails: bool,
}

static BUDGETS: [ProofBudget; 4] = [
    ProofBudget {
        risk_class: RiskClass::R0,
        required_levels: &[ProofLevel::S1],
        minimum_pillars: 1,
        requires_alternatives: false,
        requires_guardrails: false,
    },
    ProofBudget {
        risk_class: RiskClass::R1,
        required_levels: &[ProofLevel::S0, ProofLevel::S1],
        minimum_pillars: 1,
        requires_alternatives: false,
        requires_guardrails: false,
    },
    ProofBudget {
        risk_class: RiskClass::R2,
        required_levels: &[ProofLevel::S2, ProofLevel::S4],
        minimum_pillars: 2,
        requires_alternatives: true,
        requires_guardrails: true,
    },
    ProofBudget {
        risk_class: RiskClass::R3,
        required_levels: &[],
        minimum_pillars: 0,
        requires_alternatives: false,
        requires_guardrails: true,
    },
];

impl ProofBudget {
    /// The static budget for a risk class
    pub fn for_risk(risk: RiskClass) -> &'static ProofBudget {
        match risk {
            RiskClass::R0 => &BUDGETS[0],
            RiskClass::R1 => &BUDGETS[1],
            RiskClass::R2 => &BUDGETS[2],
            RiskClass::R3 => &BUDGETS[3],
        }
    }

    /// An empty budget signals STOP: no proof can satisfy it
    pub fn is_stop(&self) -> bool {
        self.required_levels.is_empty()
    }

    /// Lowest proof level the budget accepts
    pub fn minimum_level(&self) -> Option<ProofLevel> {
        self.required_levels.iter().min().copied()
    }

    /// Whether a proof level meets the budget
    pub fn accepts(&self, level: ProofLevel) -> bool {
        self.minimum_level().is_some_and(|min| level >= min)
    }
}
