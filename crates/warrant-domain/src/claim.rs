//! Claim module - the atomic assertion every review is built from

use crate::error::{DomainError, Result};
use crate::gap::GapClosure;
use crate::lexicon::{CAUSAL, PROMISSORY};
use crate::tag::{ClaimStatus, OriginTag, ProofLevel, Testability};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger identifier of a claim (e.g. `C-007`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(String);

impl ClaimId {
    /// Create a claim id from any string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Sequential id with the ledger prefix
    ///
    /// # Examples
    ///
    /// ```
    /// use warrant_domain::ClaimId;
    ///
    /// assert_eq!(ClaimId::sequential(7).as_str(), "C-007");
    /// ```
    pub fn sequential(n: usize) -> Self {
        Self(format!("C-{:03}", n))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClaimId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A claim: one factual or causal assertion with provenance and proof
///
/// Fields are public so that gate checks can inspect (and repairs can
/// correct) claims in place. [`Claim::builder`] is the checked way in: it
/// refuses a GAP claim without a complete closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,

    /// The assertion itself
    pub text: String,

    /// Where the claim comes from
    pub origin: OriginTag,

    /// Strength of the supporting evidence
    pub proof_level: ProofLevel,

    /// How decisively the claim can be checked
    pub testability: Testability,

    /// Claims this one depends on
    pub dependencies: Vec<ClaimId>,

    /// Outcome of checking the claim
    pub status: ClaimStatus,

    /// How the claim would be tested
    pub test_description: Option<String>,

    /// Mandatory for GAP claims
    pub gap_closure: Option<GapClosure>,
}

impl Claim {
    /// Start building a claim
    pub fn builder(
        id: impl Into<ClaimId>,
        text: impl Into<String>,
        origin: OriginTag,
    ) -> ClaimBuilder {
        ClaimBuilder {
            claim: Claim {
                id: id.into(),
                text: text.into(),
                origin,
                proof_level: ProofLevel::default(),
                testability: Testability::default(),
                dependencies: Vec::new(),
                status: ClaimStatus::default(),
                test_description: None,
                gap_closure: None,
            },
        }
    }

    /// Whether the text asserts a causal relationship
    pub fn is_causal(&self) -> bool {
        CAUSAL.is_match(&self.text)
    }

    /// Whether the text uses promissory vocabulary
    pub fn is_promissory(&self) -> bool {
        PROMISSORY.is_match(&self.text)
    }

    /// A causal claim must carry an explicit PASS/FAIL test (T2 or better)
    ///
    /// Non-causal claims trivially satisfy the rule.
    pub fn validate_strong_causality(&self) -> bool {
        !self.is_causal() || self.testability.is_decisive()
    }

    /// Whether the claim is tagged GAP
    pub fn is_gap(&self) -> bool {
        self.origin == OriginTag::Gap
    }

    /// Whether a GAP claim carries a complete closure
    ///
    /// Always true for non-GAP claims.
    pub fn has_valid_closure(&self) -> bool {
        if !self.is_gap() {
            return true;
        }
        self.gap_closure
            .as_ref()
            .is_some_and(GapClosure::is_complete)
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}, {}, {}, {})",
            self.id, self.text, self.origin, self.proof_level, self.testability, self.status
        )
    }
}

/// Builder enforcing construction-time invariants
#[derive(Debug, Clone)]
pub struct ClaimBuilder {
    claim: Claim,
}

impl ClaimBuilder {
    /// Set the proof level
    pub fn proof_level(mut self, level: ProofLevel) -> Self {
        self.claim.proof_level = level;
        self
    }

    /// Set the testability level
    pub fn testability(mut self, level: Testability) -> Self {
        self.claim.testability = level;
        self
    }

    /// Set the status
    pub fn status(mut self, status: ClaimStatus) -> Self {
        self.claim.status = status;
        self
    }

    /// Add a dependency
    pub fn depends_on(mut self, id: impl Into<ClaimId>) -> Self {
        self.claim.dependencies.push(id.into());
        self
    }

    /// Set all dependencies
    pub fn dependencies(mut self, ids: Vec<ClaimId>) -> Self {
        self.claim.dependencies = ids;
        self
    }

    /// Describe how the claim is tested
    pub fn test_description(mut self, test: impl Into<String>) -> Self {
        self.claim.test_description = Some(test.into());
        self
    }

    /// Attach a gap closure
    pub fn gap_closure(mut self, closure: GapClosure) -> Self {
        self.claim.gap_closure = Some(closure);
        self
    }

    /// Finish the claim
    ///
    /// Rejects empty text, a GAP claim without a closure, and any closure
    /// (GAP or not) with an empty field.
    pub fn build(self) -> Result<Claim> {
        let claim = self.claim;
        if claim.text.trim().is_empty() {
            return Err(DomainError::EmptyClaimText(claim.id.to_string()));
        }
        match &claim.gap_closure {
            Some(closure) => closure.validate()?,
            None if claim.is_gap() => {
                return Err(DomainError::MissingGapClosure(claim.id.to_string()))
            }
            None => {}
        }
        Ok(claim)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn testability() -> impl Strategy<Value = Testability> {
        prop_oneof![
            Just(Testability::T0),
            Just(Testability::T1),
            Just(Testability::T2),
            Just(Testability::T3),
        ]
    }

    proptest! {
        /// Property: a causal claim is strong iff its testability is T2 or T3
        #[test]
        fn test_causal_strength_matches_testability(
            subject in "[a-z]{1,12}",
            object in "[a-z]{1,12}",
            level in testability(),
        ) {
            let text = format!("{} leads to {}", subject, object);
            let claim = Claim::builder("C-100", text, OriginTag::Ded)
                .testability(level)
                .build()
                .unwrap();
            prop_assert!(claim.is_causal());
            prop_assert_eq!(
                claim.validate_strong_causality(),
                matches!(level, Testability::T2 | Testability::T3)
            );
        }

        /// Property: a GAP claim builds iff every closure field is non-empty
        #[test]
        fn test_gap_closure_completeness(mask in proptest::collection::vec(any::<bool>(), 6)) {
            let value =
                |keep: bool, text: &str| if keep { text.to_string() } else { String::new() };
            let closure = GapClosure {
                gap_id: value(mask[0], "GAP-9"),
                description: value(mask[1], "unknown"),
                decision: value(mask[2], "assume worst"),
                test: value(mask[3], "ask"),
                impact: value(mask[4], "rework"),
                termination: value(mask[5], "PROTOCOL"),
            };
            let built = Claim::builder("C-101", "Gap", OriginTag::Gap)
                .gap_closure(closure)
                .build();
            prop_assert_eq!(built.is_ok(), mask.iter().all(|keep| *keep));
        }
    }
}
