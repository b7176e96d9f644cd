//! Warrant Pipeline
//!
//! Runs a project description through eight ordered stages and produces a
//! deliverable record with one of four termination codes.
//!
//! ```text
//! TUNE → COMPILE → EXPAND → BRANCH → LINT → STRESS → SELECT → COMMIT
//! ```
//!
//! Each stage transforms one [`ProjectContext`]. LINT gates the dossier and
//! repairs it within the run's repair budget; a stage that still fails is
//! degraded and the run continues, but can no longer be delivered.
//!
//! # Examples
//!
//! ```
//! use warrant_domain::TerminationCode;
//! use warrant_pipeline::{Pipeline, ProjectInput};
//!
//! let mut input = ProjectInput::new("Choose a host for the team wiki");
//! input.signals.risk.illegal = true;
//!
//! let record = Pipeline::default().run(input).unwrap();
//! assert_eq!(record.termination, TerminationCode::Refused);
//! assert!(record.recommendation.is_none());
//! ```

#![warn(missing_docs)]

mod config;
mod context;
mod error;
mod input;
mod pipeline;
mod record;
mod signals;
pub mod stages;
mod summary;

pub use config::PipelineConfig;
pub use context::ProjectContext;
pub use error::{PipelineError, Result};
pub use input::{
    is_unspecified, render_value, ClaimInput, DeclaredSignals, ProjectInput, Section, SectionKind,
};
pub use pipeline::Pipeline;
pub use record::{DeliverableRecord, DraftedField, StageRecord, TriggerRecord};
pub use signals::{derive_signals, detect_complexity, detect_risk, DerivedSignals};
pub use stages::decide_termination;
pub use summary::ValidationSummary;
