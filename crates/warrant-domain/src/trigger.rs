//! Tool-invocation triggers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition under which an external evidence lookup is warranted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trigger {
    /// Facts that go stale: prices, laws, versions
    Recency,
    /// Specialised domain knowledge
    Niche,
    /// R2 work needing external sources
    HighRisk,
}

impl Trigger {
    /// Get the trigger tag (e.g. `T-RECENCY`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Recency => "T-RECENCY",
            Trigger::Niche => "T-NICHE",
            Trigger::HighRisk => "T-R2",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
