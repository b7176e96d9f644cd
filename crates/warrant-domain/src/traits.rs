//! Trait definitions for external collaborators
//!
//! The review core never performs lookups itself. It asks a collaborator
//! and records whether evidence came back.

use crate::trigger::Trigger;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// What the pipeline asks a collaborator to look up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRequest {
    /// Condition that fired
    pub trigger: Trigger,
    /// Text the trigger fired on
    pub query: String,
}

/// Evidence returned by a collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// What the source says
    pub summary: String,
    /// Where it comes from (URL, document, dataset)
    pub source: String,
}

/// Trait for external evidence lookups (web search, documentation, pricing)
///
/// Retry, timeout and fallback policies belong to the implementation.
pub trait EvidenceProvider {
    /// Error type for lookups
    type Error: std::fmt::Display;

    /// Look up evidence for a fired trigger; `Ok(None)` when nothing was found
    fn fetch(&self, request: &EvidenceRequest) -> Result<Option<Evidence>, Self::Error>;
}

/// Provider used when no collaborator is wired in: never returns evidence
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvidence;

impl EvidenceProvider for NoEvidence {
    type Error = Infallible;

    fn fetch(&self, _request: &EvidenceRequest) -> Result<Option<Evidence>, Self::Error> {
        Ok(None)
    }
}

impl<P: EvidenceProvider + ?Sized> EvidenceProvider for &P {
    type Error = P::Error;

    fn fetch(&self, request: &EvidenceRequest) -> Result<Option<Evidence>, Self::Error> {
        (**self).fetch(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_evidence() {
        let request = EvidenceRequest {
            trigger: Trigger::Recency,
            query: "latest pricing".to_string(),
        };
        assert_eq!(NoEvidence.fetch(&request), Ok(None));
    }
}
