//! The subject of every gate check

use crate::ledger::{ClaimLedger, GapLedger};
use crate::option::SolutionOption;
use serde::{Deserialize, Serialize};

/// Claims, gaps and options under review
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dossier {
    /// Claim ledger
    pub claims: ClaimLedger,
    /// Gap ledger
    pub gaps: GapLedger,
    /// Candidate options in declaration order
    pub options: Vec<SolutionOption>,
}

impl Dossier {
    /// Create an empty dossier
    pub fn new() -> Self {
        Self::default()
    }

    /// Options of kind external
    pub fn external_options(&self) -> impl Iterator<Item = &SolutionOption> {
        self.options.iter().filter(|o| o.is_external())
    }
}
