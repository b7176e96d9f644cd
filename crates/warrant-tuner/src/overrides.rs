//! User overrides of control parameters

use crate::error::{Result, TunerError};
use crate::params::{
    AsCode, Budget, ControlParameters, Divergence, EvidenceLevel, Mode, Moderation, ShowMode,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Most repair attempts an override may request
pub const MAX_REPAIR_OVERRIDE: u32 = 10;

/// Field-by-field overrides, applied after tuning
///
/// Keys that do not name a parameter are collected in `unknown` and
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterOverrides {
    /// Depth of the run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Time budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    /// Evidence demanded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<EvidenceLevel>,
    /// Alternatives explored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divergence: Option<Divergence>,
    /// Dependency cross-check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross: Option<bool>,
    /// Proof adequacy check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcx: Option<bool>,
    /// Nested re-gate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nest: Option<bool>,
    /// Governance defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_gov: Option<bool>,
    /// Evidence collaborator calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_tools: Option<bool>,
    /// Profile-table tuning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_tune: Option<bool>,
    /// Repair loop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_correct: Option<bool>,
    /// Repair attempts per stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_max: Option<u32>,
    /// Record exposure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<ShowMode>,
    /// Code artefacts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_code: Option<AsCode>,
    /// Moderation checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderation: Option<Moderation>,

    /// Keys that match no parameter
    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

macro_rules! apply_field {
    ($self:ident, $params:ident, $applied:ident, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $self.$field {
                $params.$field = value;
                $applied.push(stringify!($field));
            }
        )+
    };
}

macro_rules! merge_field {
    ($self:ident, $higher:ident, $($field:ident),+ $(,)?) => {
        ParameterOverrides {
            $($field: $higher.$field.or($self.$field),)+
            unknown: {
                let mut unknown = $self.unknown.clone();
                unknown.extend($higher.unknown.clone());
                unknown
            },
        }
    };
}

impl ParameterOverrides {
    /// Load overrides from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let overrides: Self = toml::from_str(toml_str)?;
        overrides.validate()?;
        Ok(overrides)
    }

    /// Validate override values
    pub fn validate(&self) -> Result<()> {
        if let Some(repair_max) = self.repair_max {
            if repair_max > MAX_REPAIR_OVERRIDE {
                return Err(TunerError::InvalidOverride {
                    field: "repair_max",
                    reason: format!("{} exceeds {}", repair_max, MAX_REPAIR_OVERRIDE),
                });
            }
        }
        Ok(())
    }

    /// Apply the set fields to `params`, returning the names of the
    /// fields that were applied
    pub fn apply(&self, params: &mut ControlParameters) -> Vec<&'static str> {
        let mut applied = Vec::new();
        apply_field!(
            self, params, applied, mode, budget, evidence, divergence, cross, pcx, nest, auto_gov,
            auto_tools, auto_tune, auto_correct, repair_max, show, as_code, moderation,
        );
        applied
    }

    /// Combine with overrides of higher precedence; `higher` wins per field
    pub fn merge(&self, higher: &ParameterOverrides) -> ParameterOverrides {
        merge_field!(
            self, higher, mode, budget, evidence, divergence, cross, pcx, nest, auto_gov,
            auto_tools, auto_tune, auto_correct, repair_max, show, as_code, moderation,
        )
    }

    /// Keys that were ignored because they name no parameter
    pub fn unknown_keys(&self) -> Vec<String> {
        self.unknown.keys().cloned().collect()
    }

    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
