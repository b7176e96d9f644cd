//! Pipeline configuration

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use warrant_gatekeeper::GateConfig;
use warrant_tuner::ParameterOverrides;

/// Configuration shared by every run of a pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Gate battery settings; moderation is switched per run
    pub gate: GateConfig,

    /// Default overrides, below those carried by the input
    pub overrides: ParameterOverrides,
}

impl PipelineConfig {
    /// Create a strict configuration (tighter external-option cap)
    pub fn strict() -> Self {
        Self {
            gate: GateConfig::strict(),
            overrides: ParameterOverrides::default(),
        }
    }

    /// Create a permissive configuration (advisory checks off)
    pub fn permissive() -> Self {
        Self {
            gate: GateConfig::permissive(),
            overrides: ParameterOverrides::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.gate.validate().map_err(PipelineError::Config)?;
        self.overrides.validate()?;
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| PipelineError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warrant_tuner::EvidenceLevel;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn test_presets() {
        assert_eq!(PipelineConfig::strict().gate.max_external_options, 2);
        assert!(!PipelineConfig::permissive().gate.flag_important_gaps);
    }

    #[test]
    fn test_from_toml() {
        let config = PipelineConfig::from_toml(
            r#"
            [gate]
            max_external_options = 4

            [overrides]
            evidence = "high"
            "#,
        )
        .unwrap();
        assert_eq!(config.gate.max_external_options, 4);
        assert_eq!(config.overrides.evidence, Some(EvidenceLevel::High));
    }

    #[test]
    fn test_invalid_config() {
        assert!(PipelineConfig::from_toml("[gate]\nmax_external_options = 0").is_err());
        assert!(PipelineConfig::from_toml("[overrides]\nrepair_max = 99").is_err());
    }
}
