//! Gaps: missing information that must be closed, never silently defaulted
//!
//! Every gap carries a [`GapClosure`]: a conservative decision to proceed on,
//! a test that would close it, the impact if the decision is wrong, and the
//! termination it forces while open.

use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Mandatory resolution record for a gap
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GapClosure {
    /// Gap identifier
    #[serde(default)]
    pub gap_id: String,

    /// What is missing
    #[serde(default)]
    pub description: String,

    /// Conservative decision taken while the gap is open
    #[serde(default)]
    pub decision: String,

    /// Test that would close the gap
    #[serde(default)]
    pub test: String,

    /// Impact if the conservative decision turns out wrong
    #[serde(default)]
    pub impact: String,

    /// Termination forced while the gap stays open
    #[serde(default)]
    pub termination: String,
}

/// Conservative defaults used when a closure field has to be filled
pub mod conservative {
    /// Decision text
    pub const DECISION: &str = "Treat as unknown and prefer the most reversible option";
    /// Impact text
    pub const IMPACT: &str = "Conclusions that depend on this gap may not hold";
    /// Termination text
    pub const TERMINATION: &str = "TERM-PROTOCOL until confirmed";
}

impl GapClosure {
    /// Names of the closure fields, in record order
    pub const FIELDS: [&'static str; 6] =
        ["gap_id", "description", "decision", "test", "impact", "termination"];

    /// Create a closure, rejecting any empty field
    pub fn new(
        gap_id: impl Into<String>,
        description: impl Into<String>,
        decision: impl Into<String>,
        test: impl Into<String>,
        impact: impl Into<String>,
        termination: impl Into<String>,
    ) -> Result<Self> {
        let closure = Self {
            gap_id: gap_id.into(),
            description: description.into(),
            decision: decision.into(),
            test: test.into(),
            impact: impact.into(),
            termination: termination.into(),
        };
        closure.validate()?;
        Ok(closure)
    }

    /// Build a closure from conservative defaults
    ///
    /// Used only to repair a GAP claim that lost its closure; the
    /// description is kept as given and nothing new is asserted.
    pub fn conservative(gap_id: impl Into<String>, description: impl Into<String>) -> Self {
        let mut closure = Self {
            gap_id: gap_id.into(),
            description: description.into(),
            ..Self::default()
        };
        closure.fill_missing();
        closure
    }

    /// Names of empty (or whitespace-only) fields
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::FIELDS
            .into_iter()
            .zip(self.values())
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Whether every field is present
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Check completeness, reporting the missing fields
    pub fn validate(&self) -> Result<()> {
        let fields = self.missing_fields();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(DomainError::IncompleteGapClosure {
                gap_id: self.gap_id.clone(),
                fields,
            })
        }
    }

    /// Fill only the empty fields with conservative defaults
    ///
    /// Returns the names of the fields that were filled. Idempotent.
    pub fn fill_missing(&mut self) -> Vec<&'static str> {
        let missing = self.missing_fields();
        for field in &missing {
            match *field {
                "gap_id" => self.gap_id = "GAP-UNNAMED".to_string(),
                "description" => self.description = format!("Unspecified gap {}", self.gap_id),
                "decision" => self.decision = conservative::DECISION.to_string(),
                "test" => {
                    self.test = format!("Obtain stakeholder confirmation: {}", self.description)
                }
                "impact" => self.impact = conservative::IMPACT.to_string(),
                "termination" => self.termination = conservative::TERMINATION.to_string(),
                _ => {}
            }
        }
        missing
    }

    /// Fill only the empty fields from another closure of the same gap
    ///
    /// Returns the names of the fields that were filled.
    pub fn fill_missing_from(&mut self, source: &GapClosure) -> Vec<&'static str> {
        let mut filled = Vec::new();
        let targets = [
            ("description", &mut self.description, &source.description),
            ("decision", &mut self.decision, &source.decision),
            ("test", &mut self.test, &source.test),
            ("impact", &mut self.impact, &source.impact),
            ("termination", &mut self.termination, &source.termination),
        ];
        for (name, target, value) in targets {
            if target.trim().is_empty() && !value.trim().is_empty() {
                *target = value.clone();
                filled.push(name);
            }
        }
        filled
    }

    fn values(&self) -> [&str; 6] {
        [
            &self.gap_id,
            &self.description,
            &self.decision,
            &self.test,
            &self.impact,
            &self.termination,
        ]
    }
}

/// Whether an open gap blocks delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPriority {
    /// Terminal: forces TERM-PROTOCOL until answered
    Blocking,

    /// Recorded, does not block
    Advisory,
}

impl GapPriority {
    /// Get the priority name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            GapPriority::Blocking => "blocking",
            GapPriority::Advisory => "advisory",
        }
    }
}

/// A gap record in the gap ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    /// Closure fields
    pub closure: GapClosure,

    /// Input field the gap was raised for (e.g. `users_load.peak_rps`)
    pub field: Option<String>,

    /// Blocking or advisory
    pub priority: GapPriority,
}

impl Gap {
    /// Create a gap record; the closure must be complete
    pub fn new(closure: GapClosure, priority: GapPriority) -> Result<Self> {
        closure.validate()?;
        Ok(Self {
            closure,
            field: None,
            priority,
        })
    }

    /// Attach the originating input field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Gap identifier
    pub fn id(&self) -> &str {
        &self.closure.gap_id
    }

    /// Whether the gap forces TERM-PROTOCOL
    pub fn is_terminal(&self) -> bool {
        self.priority == GapPriority::Blocking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_closure() -> GapClosure {
        GapClosure::new(
            "GAP-001",
            "Peak requests per second unknown",
            "Size for 10x the current average",
            "Confirm peak load with the product owner",
            "Capacity plan may be undersized",
            "TERM-PROTOCOL until confirmed",
        )
        .unwrap()
    }

    #[test]
    fn test_complete_closure() {
        let closure = create_test_closure();
        assert!(closure.is_complete());
        assert!(closure.validate().is_ok());
    }

    #[test]
    fn test_each_empty_field_rejected() {
        for field in GapClosure::FIELDS {
            let mut closure = create_test_closure();
            match field {
                "gap_id" => closure.gap_id.clear(),
                "description" => closure.description.clear(),
                "decision" => closure.decision.clear(),
                "test" => closure.test = "   ".to_string(),
                "impact" => closure.impact.clear(),
                _ => closure.termination.clear(),
            }
            assert_eq!(closure.missing_fields(), vec![field]);
            assert!(closure.validate().is_err());
        }
    }

    #[test]
    fn test_new_rejects_empty_decision() {
        let result = GapClosure::new("GAP-002", "SLA unknown", "", "Ask", "Latency", "PROTOCOL");
        match result {
            Err(DomainError::IncompleteGapClosure { fields, .. }) => {
                assert_eq!(fields, vec!["decision"]);
            }
            other => panic!("Expected IncompleteGapClosure, got {:?}", other),
        }
    }

    #[test]
    fn test_fill_missing_is_idempotent() {
        let mut closure = GapClosure {
            gap_id: "GAP-003".to_string(),
            description: "Retention period unknown".to_string(),
            ..GapClosure::default()
        };
        let filled = closure.fill_missing();
        assert_eq!(filled, vec!["decision", "test", "impact", "termination"]);
        assert!(closure.is_complete());
        assert!(closure.test.contains("Retention period unknown"));

        let before = closure.clone();
        assert!(closure.fill_missing().is_empty());
        assert_eq!(closure, before);
    }

    #[test]
    fn test_fill_missing_from_record() {
        let record = create_test_closure();
        let mut partial = GapClosure {
            gap_id: "GAP-001".to_string(),
            description: "Peak load".to_string(),
            ..GapClosure::default()
        };
        let filled = partial.fill_missing_from(&record);
        assert_eq!(filled, vec!["decision", "test", "impact", "termination"]);
        assert_eq!(partial.description, "Peak load");
        assert_eq!(partial.decision, record.decision);
        assert!(partial.is_complete());
    }

    #[test]
    fn test_conservative_closure_is_complete() {
        let closure = GapClosure::conservative("GAP-004", "Data volume unknown");
        assert!(closure.is_complete());
        assert_eq!(closure.decision, conservative::DECISION);
    }

    #[test]
    fn test_gap_requires_complete_closure() {
        let mut closure = create_test_closure();
        closure.impact.clear();
        assert!(Gap::new(closure, GapPriority::Blocking).is_err());

        let gap = Gap::new(create_test_closure(), GapPriority::Blocking)
            .unwrap()
            .with_field("users_load.peak_rps");
        assert!(gap.is_terminal());
        assert_eq!(gap.id(), "GAP-001");
        assert_eq!(gap.field.as_deref(), Some("users_load.peak_rps"));
    }
}
