//! Ordered claim and gap ledgers

use crate::claim::{Claim, ClaimId};
use crate::error::{DomainError, Result};
use crate::gap::Gap;
use crate::tag::{ClaimStatus, OriginTag, ProofLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Claims in insertion order, unique by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimLedger {
    claims: Vec<Claim>,
}

impl ClaimLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a claim; duplicate ids are rejected
    pub fn add(&mut self, claim: Claim) -> Result<&Claim> {
        if self.contains(&claim.id) {
            return Err(DomainError::DuplicateClaim(claim.id.to_string()));
        }
        self.claims.push(claim);
        let last = self.claims.len() - 1;
        Ok(&self.claims[last])
    }

    /// Next free sequential id (`C-001`, `C-002`, ...)
    pub fn next_id(&self) -> ClaimId {
        let mut n = self.claims.len() + 1;
        loop {
            let id = ClaimId::sequential(n);
            if !self.contains(&id) {
                return id;
            }
            n += 1;
        }
    }

    /// Whether a claim with this id exists
    pub fn contains(&self, id: &ClaimId) -> bool {
        self.claims.iter().any(|c| &c.id == id)
    }

    /// Look up a claim
    pub fn get(&self, id: &ClaimId) -> Option<&Claim> {
        self.claims.iter().find(|c| &c.id == id)
    }

    /// Look up a claim for correction
    pub fn get_mut(&mut self, id: &ClaimId) -> Option<&mut Claim> {
        self.claims.iter_mut().find(|c| &c.id == id)
    }

    /// Remove a claim, keeping the order of the rest
    pub fn remove(&mut self, id: &ClaimId) -> Option<Claim> {
        let index = self.claims.iter().position(|c| &c.id == id)?;
        Some(self.claims.remove(index))
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Claim> {
        self.claims.iter()
    }

    /// Iterate mutably in insertion order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Claim> {
        self.claims.iter_mut()
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Counts by status, origin and proof level
    pub fn statistics(&self) -> LedgerStatistics {
        let mut stats = LedgerStatistics {
            total: self.claims.len(),
            ..LedgerStatistics::default()
        };
        for claim in &self.claims {
            *stats.by_status.entry(claim.status).or_insert(0) += 1;
            *stats.by_origin.entry(claim.origin).or_insert(0) += 1;
            *stats.by_proof_level.entry(claim.proof_level).or_insert(0) += 1;
            if claim.is_causal() {
                stats.causal += 1;
            }
        }
        stats
    }
}

impl<'a> IntoIterator for &'a ClaimLedger {
    type Item = &'a Claim;
    type IntoIter = std::slice::Iter<'a, Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}

/// Claim counts for the record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStatistics {
    /// Number of claims
    pub total: usize,
    /// Claims per status
    pub by_status: BTreeMap<ClaimStatus, usize>,
    /// Claims per origin tag
    pub by_origin: BTreeMap<OriginTag, usize>,
    /// Claims per proof level
    pub by_proof_level: BTreeMap<ProofLevel, usize>,
    /// Claims asserting causality
    pub causal: usize,
}

impl LedgerStatistics {
    /// Count for one status
    pub fn status(&self, status: ClaimStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// Count for one origin
    pub fn origin(&self, origin: OriginTag) -> usize {
        self.by_origin.get(&origin).copied().unwrap_or(0)
    }
}

/// Gap records in insertion order, unique by gap id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GapLedger {
    gaps: Vec<Gap>,
}

impl GapLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a gap; duplicate ids are rejected
    pub fn add(&mut self, gap: Gap) -> Result<&Gap> {
        if self.get(gap.id()).is_some() {
            return Err(DomainError::DuplicateGap(gap.id().to_string()));
        }
        self.gaps.push(gap);
        let last = self.gaps.len() - 1;
        Ok(&self.gaps[last])
    }

    /// Next free sequential id (`GAP-001`, ...)
    pub fn next_id(&self) -> String {
        let mut n = self.gaps.len() + 1;
        loop {
            let id = format!("GAP-{:03}", n);
            if self.get(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }

    /// Look up a gap
    pub fn get(&self, gap_id: &str) -> Option<&Gap> {
        self.gaps.iter().find(|g| g.id() == gap_id)
    }

    /// Look up a gap for correction
    pub fn get_mut(&mut self, gap_id: &str) -> Option<&mut Gap> {
        self.gaps.iter_mut().find(|g| g.id() == gap_id)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Gap> {
        self.gaps.iter()
    }

    /// Iterate mutably in insertion order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Gap> {
        self.gaps.iter_mut()
    }

    /// Gaps flagged terminal
    pub fn blocking(&self) -> impl Iterator<Item = &Gap> {
        self.gaps.iter().filter(|g| g.is_terminal())
    }

    /// Number of gaps
    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    /// Whether the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }
}

impl<'a> IntoIterator for &'a GapLedger {
    type Item = &'a Gap;
    type IntoIter = std::slice::Iter<'a, Gap>;

    fn into_iter(self) -> Self::IntoIter {
        self.gaps.iter()
    }
}
