//! Risk classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of what could go wrong, ordered R0 < R1 < R2 < R3
///
/// R3 dominates: it forces TERM-REFUSED and can never be downgraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskClass {
    /// Negligible risk (reserved, never produced by the classifier)
    R0,
    /// Ordinary risk
    R1,
    /// Financial, legal, security, health or personal-data impact
    R2,
    /// Illegal or dangerous
    R3,
}

impl RiskClass {
    /// Classify from boolean signals
    ///
    /// `illegal ∨ dangerous → R3`, any impact signal `→ R2`, else `R1`.
    pub fn classify(signals: &RiskSignals) -> Self {
        if signals.illegal || signals.dangerous {
            RiskClass::R3
        } else if signals.financial
            || signals.legal
            || signals.security
            || signals.health
            || signals.pii
        {
            RiskClass::R2
        } else {
            RiskClass::R1
        }
    }

    /// Get the class name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskClass::R0 => "R0",
            RiskClass::R1 => "R1",
            RiskClass::R2 => "R2",
            RiskClass::R3 => "R3",
        }
    }

    /// Whether the class demands high-risk scrutiny (R2 or R3)
    pub fn is_high(&self) -> bool {
        *self >= RiskClass::R2
    }

    /// Combine with a newly derived class; never lowers the current one
    pub fn escalate(self, other: RiskClass) -> RiskClass {
        self.max(other)
    }
}

impl fmt::Display for RiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean risk signals, declared by the user or detected lexically
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSignals {
    /// Money at stake
    pub financial: bool,
    /// Legal or regulatory exposure
    pub legal: bool,
    /// Security exposure
    pub security: bool,
    /// Health or safety of people
    pub health: bool,
    /// Personal data involved
    pub pii: bool,
    /// Activity is illegal
    pub illegal: bool,
    /// Activity is dangerous
    pub dangerous: bool,
}

impl RiskSignals {
    /// Signal-wise OR
    pub fn merge(&self, other: &RiskSignals) -> RiskSignals {
        RiskSignals {
            financial: self.financial || other.financial,
            legal: self.legal || other.legal,
            security: self.security || other.security,
            health: self.health || other.health,
            pii: self.pii || other.pii,
            illegal: self.illegal || other.illegal,
            dangerous: self.dangerous || other.dangerous,
        }
    }

    /// Names of the signals that are set
    pub fn active(&self) -> Vec<&'static str> {
        [
            ("financial", self.financial),
            ("legal", self.legal),
            ("security", self.security),
            ("health", self.health),
            ("pii", self.pii),
            ("illegal", self.illegal),
            ("dangerous", self.dangerous),
        ]
        .into_iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_r1() {
        assert_eq!(RiskClass::classify(&RiskSignals::default()), RiskClass::R1);
    }

    #[test]
    fn test_impact_signals_give_r2() {
        let signals = RiskSignals {
            financial: true,
            ..RiskSignals::default()
        };
        assert_eq!(RiskClass::classify(&signals), RiskClass::R2);
        let signals = RiskSignals {
            pii: true,
            ..RiskSignals::default()
        };
        assert_eq!(RiskClass::classify(&signals), RiskClass::R2);
    }

    #[test]
    fn test_illegal_dominates() {
        let signals = RiskSignals {
            illegal: true,
            financial: true,
            security: true,
            ..RiskSignals::default()
        };
        assert_eq!(RiskClass::classify(&signals), RiskClass::R3);
    }

    #[test]
    fn test_escalate_never_lowers() {
        assert_eq!(RiskClass::R3.escalate(RiskClass::R1), RiskClass::R3);
        assert_eq!(RiskClass::R1.escalate(RiskClass::R2), RiskClass::R2);
    }

    #[test]
    fn test_merge_and_active() {
        let declared = RiskSignals {
            legal: true,
            ..RiskSignals::default()
        };
        let detected = RiskSignals {
            pii: true,
            ..RiskSignals::default()
        };
        assert_eq!(declared.merge(&detected).active(), vec!["legal", "pii"]);
    }
}
