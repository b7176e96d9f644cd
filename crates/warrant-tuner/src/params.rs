//! Control parameters and the profile table

use serde::{Deserialize, Serialize};
use std::fmt;
use warrant_domain::Profile;

macro_rules! text_enum {
    ($name:ident, $label:literal) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s).ok_or_else(|| format!("Invalid {}: {}", $label, s))
            }
        }
    };
}

/// Depth of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Minimal pass
    Light,
    /// Full pass
    Max,
    /// Full pass with capped divergence
    MaxCap,
    /// Multi-part project
    Projet,
}

impl Mode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Light => "LIGHT",
            Mode::Max => "MAX",
            Mode::MaxCap => "MAXCAP",
            Mode::Projet => "PROJET",
        }
    }

    /// Parse a mode (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Mode::Light),
            "max" => Some(Mode::Max),
            "maxcap" => Some(Mode::MaxCap),
            "projet" | "project" => Some(Mode::Projet),
            _ => None,
        }
    }
}

text_enum!(Mode, "mode");

/// Time budget of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    /// Short
    Short,
    /// Medium
    Medium,
    /// Long
    Long,
}

impl Budget {
    /// Get the budget name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Budget::Short => "short",
            Budget::Medium => "medium",
            Budget::Long => "long",
        }
    }

    /// Parse a budget (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "short" => Some(Budget::Short),
            "medium" => Some(Budget::Medium),
            "long" => Some(Budget::Long),
            _ => None,
        }
    }
}

text_enum!(Budget, "budget");

/// How much evidence the run demands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceLevel {
    /// Low
    Low,
    /// Mid
    Mid,
    /// High: too few proof pillars becomes fatal
    High,
}

impl EvidenceLevel {
    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceLevel::Low => "low",
            EvidenceLevel::Mid => "mid",
            EvidenceLevel::High => "high",
        }
    }

    /// Parse a level (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(EvidenceLevel::Low),
            "mid" => Some(EvidenceLevel::Mid),
            "high" => Some(EvidenceLevel::High),
            _ => None,
        }
    }
}

text_enum!(EvidenceLevel, "evidence level");

/// How many alternatives the run explores
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Divergence {
    /// Low
    Low,
    /// Mid
    Mid,
    /// High
    High,
}

impl Divergence {
    /// Get the divergence name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Divergence::Low => "low",
            Divergence::Mid => "mid",
            Divergence::High => "high",
        }
    }

    /// Parse a divergence (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Divergence::Low),
            "mid" => Some(Divergence::Mid),
            "high" => Some(Divergence::High),
            _ => None,
        }
    }

    /// Number of template options generated when the input supplies none
    ///
    /// External options are capped at three, so HIGH stays at three.
    pub fn branch_count(&self) -> usize {
        match self {
            Divergence::Low => 2,
            Divergence::Mid | Divergence::High => 3,
        }
    }
}

text_enum!(Divergence, "divergence");

/// Whether the record exposes the per-stage state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowMode {
    /// Final record only
    Off,
    /// Include the per-stage validation summary
    State,
}

impl ShowMode {
    /// Get the show mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShowMode::Off => "OFF",
            ShowMode::State => "STATE",
        }
    }

    /// Parse a show mode (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" => Some(ShowMode::Off),
            "state" => Some(ShowMode::State),
            _ => None,
        }
    }
}

text_enum!(ShowMode, "show mode");

/// Whether the deliverable is produced as code artefacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsCode {
    /// Prose only
    Off,
    /// Code artefacts
    On,
    /// Decided from the deliverable type
    Auto,
}

impl AsCode {
    /// Get the as-code name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AsCode::Off => "OFF",
            AsCode::On => "ON",
            AsCode::Auto => "AUTO",
        }
    }

    /// Parse an as-code setting (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" => Some(AsCode::Off),
            "on" => Some(AsCode::On),
            "auto" => Some(AsCode::Auto),
            _ => None,
        }
    }
}

text_enum!(AsCode, "as-code setting");

/// Moderation of options and vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Moderation {
    /// Cap external options and flag promissory descriptions
    Strict,
    /// No moderation checks
    Off,
}

impl Moderation {
    /// Get the moderation name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Moderation::Strict => "STRICT",
            Moderation::Off => "OFF",
        }
    }

    /// Parse a moderation setting (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Some(Moderation::Strict),
            "off" => Some(Moderation::Off),
            _ => None,
        }
    }

    /// Whether moderation checks run
    pub fn is_strict(&self) -> bool {
        *self == Moderation::Strict
    }
}

text_enum!(Moderation, "moderation");

/// Execution parameters of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlParameters {
    /// Depth of the run
    pub mode: Mode,
    /// Time budget
    pub budget: Budget,
    /// Evidence demanded
    pub evidence: EvidenceLevel,
    /// Alternatives explored
    pub divergence: Divergence,
    /// Cross-check claim dependencies at STRESS
    pub cross: bool,
    /// Check proof adequacy at STRESS
    pub pcx: bool,
    /// Re-run the LINT battery inside STRESS
    pub nest: bool,
    /// Governance defaults applied automatically
    pub auto_gov: bool,
    /// Call the evidence collaborator for fired triggers
    pub auto_tools: bool,
    /// Derive parameters from the profile table
    pub auto_tune: bool,
    /// Run the repair loop on gate failure
    pub auto_correct: bool,
    /// Repair attempts per stage
    pub repair_max: u32,
    /// Record exposure
    pub show: ShowMode,
    /// Code artefacts
    pub as_code: AsCode,
    /// Moderation checks
    pub moderation: Moderation,
}

impl Default for ControlParameters {
    /// Baseline used when auto-tune is off
    fn default() -> Self {
        Self {
            mode: Mode::MaxCap,
            budget: Budget::Long,
            evidence: EvidenceLevel::Mid,
            divergence: Divergence::Mid,
            cross: true,
            pcx: true,
            nest: true,
            auto_gov: true,
            auto_tools: true,
            auto_tune: true,
            auto_correct: true,
            repair_max: 2,
            show: ShowMode::Off,
            as_code: AsCode::Auto,
            moderation: Moderation::Strict,
        }
    }
}

impl ControlParameters {
    /// Parameters for a profile
    ///
    /// Under SIMPLE the cross, pcx and nest checks only run when the input
    /// carries at least one important claim.
    pub fn for_profile(profile: Profile, has_important_claims: bool) -> Self {
        let base = Self::default();
        match profile {
            Profile::Simple => Self {
                mode: Mode::Light,
                budget: Budget::Short,
                evidence: EvidenceLevel::Low,
                divergence: Divergence::Low,
                cross: has_important_claims,
                pcx: has_important_claims,
                nest: has_important_claims,
                repair_max: 1,
                show: ShowMode::Off,
                ..base
            },
            Profile::Standard => Self {
                mode: Mode::Max,
                budget: Budget::Medium,
                evidence: EvidenceLevel::Mid,
                divergence: Divergence::Mid,
                repair_max: 2,
                show: ShowMode::Off,
                ..base
            },
            Profile::Complex => Self {
                mode: Mode::MaxCap,
                budget: Budget::Long,
                evidence: EvidenceLevel::High,
                divergence: Divergence::High,
                repair_max: 3,
                show: ShowMode::State,
                ..base
            },
            Profile::Projet => Self {
                mode: Mode::Projet,
                budget: Budget::Long,
                evidence: EvidenceLevel::Mid,
                divergence: Divergence::Mid,
                repair_max: 2,
                show: ShowMode::State,
                ..base
            },
        }
    }

    /// Validate the parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.repair_max > 10 {
            return Err("repair_max must be at most 10".to_string());
        }
        Ok(())
    }
}
