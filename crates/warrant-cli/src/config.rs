//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use warrant_gatekeeper::GateConfig;
use warrant_pipeline::PipelineConfig;
use warrant_scanner::ScanMode;
use warrant_tuner::ParameterOverrides;

/// CLI configuration.
///
/// ```toml
/// [settings]
/// color = true
/// format = "markdown"
///
/// [gate]
/// max_external_options = 3
///
/// [overrides]
/// divergence = "low"
///
/// [scan]
/// mode = "max"
/// baseline = ".warrant-baseline.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Gate battery settings
    #[serde(default)]
    pub gate: GateConfig,

    /// Default parameter overrides, below the input and the flags
    #[serde(default, skip_serializing_if = "ParameterOverrides::is_empty")]
    pub overrides: ParameterOverrides,

    /// Document scan defaults
    #[serde(default)]
    pub scan: ScanSettings,
}

/// Defaults for `warrant scan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Scan depth when `--mode` is absent
    #[serde(default)]
    pub mode: ScanMode,

    /// Baseline file used by `--baseline` and `--create-baseline`
    #[serde(default = "default_baseline")]
    pub baseline: PathBuf,

    /// Extra rules merged over the built-in ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<PathBuf>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown report
    Markdown,
    /// JSON record
    Json,
    /// Tables
    Table,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".warrant").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a file, or defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate the gate settings and default overrides.
    pub fn validate(&self) -> Result<()> {
        self.gate.validate().map_err(CliError::Config)?;
        self.overrides.validate()?;
        Ok(())
    }

    /// Pipeline configuration built from this file.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            gate: self.gate.clone(),
            overrides: self.overrides.clone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Markdown,
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            mode: ScanMode::default(),
            baseline: default_baseline(),
            rules: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Markdown
}

fn default_baseline() -> PathBuf {
    PathBuf::from(".warrant-baseline.json")
}
