//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Default cap on external options under strict moderation
pub const DEFAULT_MAX_EXTERNAL_OPTIONS: usize = 3;

/// Configuration for the gate battery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Enforce moderation: cap external options, flag promissory descriptions
    pub enforce_moderation: bool,

    /// Most external options allowed under moderation
    pub max_external_options: usize,

    /// Warn when an important claim is tagged GAP
    pub flag_important_gaps: bool,

    /// Treat promissory vocabulary in claims as fatal
    pub forbid_promissory_claims: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            enforce_moderation: true,
            max_external_options: DEFAULT_MAX_EXTERNAL_OPTIONS,
            flag_important_gaps: true,
            forbid_promissory_claims: true,
        }
    }
}

impl GateConfig {
    /// Create a permissive configuration (moderation and advisories off)
    pub fn permissive() -> Self {
        Self {
            enforce_moderation: false,
            max_external_options: DEFAULT_MAX_EXTERNAL_OPTIONS,
            flag_important_gaps: false,
            forbid_promissory_claims: true,
        }
    }

    /// Create a strict configuration (tighter external-option cap)
    pub fn strict() -> Self {
        Self {
            enforce_moderation: true,
            max_external_options: 2,
            flag_important_gaps: true,
            forbid_promissory_claims: true,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_external_options == 0 {
            return Err("max_external_options must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GateConfig::default();
        assert!(config.enforce_moderation);
        assert_eq!(config.max_external_options, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_permissive_config() {
        let config = GateConfig::permissive();
        assert!(!config.enforce_moderation);
        assert!(!config.flag_important_gaps);
        assert!(config.forbid_promissory_claims);
    }

    #[test]
    fn test_strict_config() {
        let config = GateConfig::strict();
        assert_eq!(config.max_external_options, 2);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = GateConfig::from_toml("max_external_options = 5").unwrap();
        assert_eq!(config.max_external_options, 5);
        assert!(config.enforce_moderation);
        assert!(GateConfig::from_toml("max_external_options = 0").is_err());
    }
}
