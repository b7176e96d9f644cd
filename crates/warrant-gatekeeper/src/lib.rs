//! Warrant Gatekeeper
//!
//! Fail-closed invariant checks over the claims, gaps and options of a
//! review, with bounded repair.
//!
//! The Gatekeeper provides:
//! - Per-claim proof validation against the risk class budget
//! - The five-check gate battery run at LINT and STRESS
//! - A repair loop that either passes the gate or degrades the stage
//!
//! # Examples
//!
//! ```
//! use warrant_domain::{Dossier, RiskClass, Stage};
//! use warrant_gatekeeper::{ConservativeRepairer, GateChecker, RepairLoop};
//!
//! let checker = GateChecker::default_config();
//! let mut dossier = Dossier::new();
//!
//! let gate = checker.check(Stage::Lint, &dossier, RiskClass::R1);
//! if !gate.passed() {
//!     let outcome = RepairLoop::new(&checker, 2).run(
//!         &mut dossier,
//!         RiskClass::R1,
//!         gate,
//!         &ConservativeRepairer::default(),
//!     );
//!     assert!(outcome.attempts <= 2);
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod finding;
mod gate;
mod repair;
mod validator;

pub use config::{GateConfig, DEFAULT_MAX_EXTERNAL_OPTIONS};
pub use finding::{union, Finding, FindingKind};
pub use gate::{GateChecker, GateResult};
pub use repair::{
    ConservativeRepairer, RepairAction, RepairAttempt, RepairLoop, RepairOutcome, Repairer,
};
pub use validator::{ClaimValidation, ProofValidator};
