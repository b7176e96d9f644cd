//! Parameter derivation for one run

use crate::deliverable::DeliverableType;
use crate::overrides::ParameterOverrides;
use crate::params::{AsCode, ControlParameters, ShowMode};
use crate::triggers::detect_triggers;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use warrant_domain::{
    ComplexityClass, ComplexitySignals, Profile, RiskClass, RiskSignals, TerminationCode, Trigger,
};

/// Gap count from which the per-stage state is always shown
pub const SHOW_GAP_THRESHOLD: usize = 3;

/// Everything the tuner looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TuneRequest {
    /// Objective in one to three sentences
    pub objective: String,
    /// Expected deliverable, possibly empty
    pub deliverable: String,
    /// Risk signals
    pub risk: RiskSignals,
    /// Complexity signals
    pub complexity: ComplexitySignals,
    /// Whether at least one important claim or decision is at stake
    pub has_important_claims: bool,
}

/// Classifications and parameters derived at TUNE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuningResult {
    /// Risk class
    pub risk_class: RiskClass,
    /// Complexity class
    pub complexity_class: ComplexityClass,
    /// Additive complexity score (0 to 5)
    pub complexity_score: u8,
    /// Deliverable type
    pub deliverable_type: DeliverableType,
    /// Operating profile
    pub profile: Profile,
    /// Triggers that fired
    pub triggers: Vec<Trigger>,
    /// Resulting parameters
    pub parameters: ControlParameters,
    /// Override fields that were applied
    pub applied_overrides: Vec<String>,
    /// Override keys that were ignored
    pub ignored_overrides: Vec<String>,
}

/// Execution facts feeding the show escalation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowSignals {
    /// Current risk class
    pub risk: Option<RiskClass>,
    /// Whether any repair loop ran
    pub repair_fired: bool,
    /// Number of recorded gaps
    pub gap_count: usize,
    /// Termination code, once decided
    pub termination: Option<TerminationCode>,
}

impl ShowSignals {
    /// Whether these facts require the per-stage state to be shown
    pub fn requires_state(&self) -> bool {
        self.risk == Some(RiskClass::R2)
            || self.repair_fired
            || self.gap_count >= SHOW_GAP_THRESHOLD
            || matches!(
                self.termination,
                Some(TerminationCode::Protocol | TerminationCode::Partial)
            )
    }
}

/// Resolve AS-CODE AUTO from the deliverable type
pub fn apply_as_code(params: &mut ControlParameters, deliverable: DeliverableType) {
    if params.as_code == AsCode::Auto {
        params.as_code = if deliverable.wants_code() {
            AsCode::On
        } else {
            AsCode::Off
        };
    }
}

/// Raise SHOW from OFF to STATE when the execution facts require it
pub fn apply_show(params: &mut ControlParameters, signals: &ShowSignals) {
    if params.show == ShowMode::Off && signals.requires_state() {
        params.show = ShowMode::State;
    }
}

/// Derives control parameters from classifiers, the profile table and
/// user overrides
#[derive(Debug, Clone, Default)]
pub struct Tuner {
    overrides: ParameterOverrides,
}

impl Tuner {
    /// Create a tuner with user overrides
    pub fn new(overrides: ParameterOverrides) -> Self {
        Self { overrides }
    }

    /// The overrides applied after every derivation
    pub fn overrides(&self) -> &ParameterOverrides {
        &self.overrides
    }

    /// Classify the request and derive its parameters
    pub fn tune(&self, request: &TuneRequest) -> TuningResult {
        let risk_class = RiskClass::classify(&request.risk);
        let complexity_score = request.complexity.score();
        let complexity_class = ComplexityClass::from_score(complexity_score);
        let deliverable_type = DeliverableType::classify(&request.objective, &request.deliverable);
        let profile = Profile::select(risk_class, complexity_class);
        let triggers = detect_triggers(&request.objective, risk_class);

        let mut parameters = if self.overrides.auto_tune == Some(false) {
            debug!("auto-tune disabled, using baseline parameters");
            ControlParameters::default()
        } else {
            ControlParameters::for_profile(profile, request.has_important_claims)
        };

        apply_as_code(&mut parameters, deliverable_type);
        apply_show(
            &mut parameters,
            &ShowSignals {
                risk: Some(risk_class),
                ..Default::default()
            },
        );

        let applied = self.overrides.apply(&mut parameters);
        // An explicit AUTO override still resolves
        apply_as_code(&mut parameters, deliverable_type);

        let ignored = self.overrides.unknown_keys();
        for key in &ignored {
            warn!(key = %key, "ignoring unknown parameter override");
        }

        debug!(
            risk = %risk_class,
            complexity = %complexity_class,
            profile = %profile,
            deliverable = %deliverable_type,
            "tuned run parameters"
        );

        TuningResult {
            risk_class,
            complexity_class,
            complexity_score,
            deliverable_type,
            profile,
            triggers,
            parameters,
            applied_overrides: applied.into_iter().map(String::from).collect(),
            ignored_overrides: ignored,
        }
    }

    /// Re-apply the show escalation with execution facts, then the overrides
    pub fn finalize(&self, params: &mut ControlParameters, signals: &ShowSignals) {
        apply_show(params, signals);
        if let Some(show) = self.overrides.show {
            params.show = show;
        }
    }
}
