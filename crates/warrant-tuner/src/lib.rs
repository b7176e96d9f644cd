//! Warrant Tuner
//!
//! Derives the control parameters of a run from its risk and complexity
//! signals, a lexical reading of the deliverable, and user overrides.
//!
//! Derivation order:
//! 1. Classify risk, complexity and deliverable type; select the profile
//! 2. Look the profile up in the parameter table
//! 3. Resolve AS-CODE AUTO and escalate SHOW
//! 4. Apply user overrides field by field, ignoring unknown keys
//!
//! # Examples
//!
//! ```
//! use warrant_domain::Profile;
//! use warrant_tuner::{ParameterOverrides, TuneRequest, Tuner};
//!
//! let overrides = ParameterOverrides::from_toml("repair_max = 3").unwrap();
//! let result = Tuner::new(overrides).tune(&TuneRequest {
//!     objective: "Draft a migration roadmap".to_string(),
//!     ..Default::default()
//! });
//!
//! assert_eq!(result.profile, Profile::Simple);
//! assert_eq!(result.parameters.repair_max, 3);
//! ```

#![warn(missing_docs)]

mod deliverable;
mod error;
mod overrides;
mod params;
mod triggers;
mod tuner;

pub use deliverable::DeliverableType;
pub use error::{Result, TunerError};
pub use overrides::{ParameterOverrides, MAX_REPAIR_OVERRIDE};
pub use params::{
    AsCode, Budget, ControlParameters, Divergence, EvidenceLevel, Mode, Moderation, ShowMode,
};
pub use triggers::detect_triggers;
pub use tuner::{
    apply_as_code, apply_show, ShowSignals, TuneRequest, Tuner, TuningResult, SHOW_GAP_THRESHOLD,
};
