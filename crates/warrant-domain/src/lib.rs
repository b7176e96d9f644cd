//! Warrant Domain Layer
//!
//! Core value objects and fixed tables of the Warrant review pipeline. Every
//! other crate depends on these types; this crate depends on none of them.
//!
//! ## Key Concepts
//!
//! - **Claim**: an atomic assertion tagged with its origin, proof level,
//!   testability and status
//! - **Gap**: missing information, recorded with a mandatory closure
//!   (decision, test, impact, termination) instead of a silent default
//! - **Risk / Complexity / Profile**: pure classifiers from boolean signals
//! - **Proof budget**: the minimum evidence a risk class demands
//! - **Termination code**: DELIVERED, PARTIAL, PROTOCOL or REFUSED, each with
//!   a fixed next step and runbook
//!
//! ## Invariants
//!
//! - A GAP claim cannot be built without a complete closure
//! - A causal claim is only strong at testability T2 or better
//! - R3 is terminal: its proof budget is empty and signals STOP

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod complexity;
pub mod dossier;
pub mod error;
pub mod gap;
pub mod ledger;
pub mod lexicon;
pub mod option;
pub mod profile;
pub mod proof_budget;
pub mod risk;
pub mod run;
pub mod stage;
pub mod tag;
pub mod termination;
pub mod traits;
pub mod trigger;

// Re-exports for convenience
pub use claim::{Claim, ClaimBuilder, ClaimId};
pub use complexity::{ComplexityClass, ComplexitySignals};
pub use dossier::Dossier;
pub use error::DomainError;
pub use gap::{Gap, GapClosure, GapPriority};
pub use ledger::{ClaimLedger, GapLedger, LedgerStatistics};
pub use option::{OptionId, OptionKind, ScoreVector, SolutionOption};
pub use profile::Profile;
pub use proof_budget::ProofBudget;
pub use risk::{RiskClass, RiskSignals};
pub use run::RunId;
pub use stage::Stage;
pub use tag::{ClaimStatus, OriginTag, ProofLevel, Testability};
pub use termination::TerminationCode;
pub use traits::{Evidence, EvidenceProvider, EvidenceRequest, NoEvidence};
pub use trigger::Trigger;
