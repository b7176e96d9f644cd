//! Final disposition of a run and its fixed follow-up actions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Termination code of a run
///
/// Ordered by severity so that `max` picks the code that must win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TerminationCode {
    /// Complete, validated deliverable
    Delivered,
    /// Deliverable produced, with recorded validation failures
    Partial,
    /// Blocked on answers to open questions
    Protocol,
    /// Illegal or dangerous request, not pursued
    Refused,
}

impl TerminationCode {
    /// Get the code as printed in records (e.g. `TERM-DELIVERED`)
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationCode::Delivered => "TERM-DELIVERED",
            TerminationCode::Partial => "TERM-PARTIAL",
            TerminationCode::Protocol => "TERM-PROTOCOL",
            TerminationCode::Refused => "TERM-REFUSED",
        }
    }

    /// The single next-step action for this code
    pub fn next_step(&self) -> &'static str {
        match self {
            TerminationCode::Delivered => {
                "Start implementing the recommended option and schedule its first acceptance test"
            }
            TerminationCode::Partial => {
                "Resolve the failing findings in the validation summary, then re-run the review"
            }
            TerminationCode::Protocol => {
                "Answer the blocking open questions with the stakeholder"
            }
            TerminationCode::Refused => {
                "Stop: the request is classified R3 and will not be pursued"
            }
        }
    }

    /// The three-step runbook for this code
    pub fn runbook(&self) -> [&'static str; 3] {
        match self {
            TerminationCode::Delivered => [
                "Provision the recommended option in a staging environment",
                "Run the acceptance tests recorded in the claim ledger",
                "Switch to the fallback option if an acceptance test fails",
            ],
            TerminationCode::Partial => [
                "Work through each fatal finding in the validation summary",
                "Supply the missing evidence or tests for the affected claims",
                "Re-run the review and compare termination codes",
            ],
            TerminationCode::Protocol => [
                "Send the blocking open questions to the stakeholder",
                "Record each answer in the input as a specified value",
                "Re-run the review once every blocking gap is answered",
            ],
            TerminationCode::Refused => [
                "Record the refusal and the signals that triggered it",
                "Escalate to legal or safety review if the classification is disputed",
                "Close the request without producing a design",
            ],
        }
    }

    /// Whether the run produced a validated deliverable
    pub fn is_delivered(&self) -> bool {
        *self == TerminationCode::Delivered
    }
}

impl fmt::Display for TerminationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
