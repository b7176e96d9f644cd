//! Pipeline stage names

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight ordered pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stage {
    /// Derive execution parameters
    Tune,
    /// Classify risk and compile triggers and stop rules
    Compile,
    /// Turn the input into facts, gaps and assumptions
    Expand,
    /// Generate and score candidate options
    Branch,
    /// Gate check with bounded repair
    Lint,
    /// Adversarial checks
    Stress,
    /// Rank options
    Select,
    /// Decide the termination code
    Commit,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 8] = [
        Stage::Tune,
        Stage::Compile,
        Stage::Expand,
        Stage::Branch,
        Stage::Lint,
        Stage::Stress,
        Stage::Select,
        Stage::Commit,
    ];

    /// Get the stage name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Tune => "TUNE",
            Stage::Compile => "COMPILE",
            Stage::Expand => "EXPAND",
            Stage::Branch => "BRANCH",
            Stage::Lint => "LINT",
            Stage::Stress => "STRESS",
            Stage::Select => "SELECT",
            Stage::Commit => "COMMIT",
        }
    }

    /// The stage that runs after this one
    pub fn next(&self) -> Option<Stage> {
        let index = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(index + 1).copied()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        assert_eq!(Stage::Tune.next(), Some(Stage::Compile));
        assert_eq!(Stage::Stress.next(), Some(Stage::Select));
        assert_eq!(Stage::Commit.next(), None);
        assert!(Stage::Lint < Stage::Stress);
    }
}
